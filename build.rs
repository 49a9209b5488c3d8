use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FACEREC_LIB_DIR");

    if env::var_os("CARGO_FEATURE_STATIC_LINK").is_none() {
        return;
    }

    println!("cargo:info=static-link feature enabled, looking for the facerec library...");

    if let Ok(lib_dir) = env::var("FACEREC_LIB_DIR") {
        println!("cargo:info=Found facerec library directory: {lib_dir}");
        println!("cargo:rustc-link-search=native={lib_dir}");
    } else {
        println!("cargo:warning=FACEREC_LIB_DIR is not set, relying on the default linker search path.");
    }
    println!("cargo:rustc-link-lib=dylib=facerec");
}
