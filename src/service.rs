//! The engine service: entry point and factory for every other object.

use crate::backends::load_library;
use crate::calibrator::CameraCalibrator;
use crate::capturer::Capturer;
use crate::config::{normalize_conf_dir, Config, License, ServiceConfig, VideoWorkerParams};
use crate::context::Context;
use crate::dynamic_index::DynamicTemplateIndex;
use crate::error::Result;
use crate::exception::call;
use crate::ffi::adapters::{collect_string, ReadAdapter};
use crate::ffi::{FacerecApi, RawHandle};
use crate::handle::{create_object, NativeObject, ObjectKind};
use crate::processing_block::ProcessingBlock;
use crate::raw_sample::RawSample;
use crate::recognizer::Recognizer;
use crate::types::LIBFACEREC_VERSION;
use crate::video_worker::VideoWorker;
use std::ffi::{c_void, CString};
use std::io::Read;
use std::ptr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A constructed engine service.
///
/// Cloning is cheap; all clones share the native service, which is
/// destroyed together with the last clone.
#[derive(Debug, Clone)]
pub struct FacerecService {
    object: Arc<NativeObject>,
    conf_dir: String,
}

impl FacerecService {
    /// Loads the library selected by `config.library` and constructs a service.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use facerec::{FacerecService, ServiceConfig};
    ///
    /// let service = FacerecService::create_service(ServiceConfig::new("/opt/face_sdk/conf/facerec"))?;
    /// println!("engine {}", service.version()?);
    /// # Ok::<(), facerec::FacerecError>(())
    /// ```
    pub fn create_service(config: ServiceConfig) -> Result<Self> {
        let api = load_library(&config.library)?;
        Self::with_api(api, &config)
    }

    /// Constructs a service on an already loaded function table.
    pub fn with_api(api: Arc<dyn FacerecApi>, config: &ServiceConfig) -> Result<Self> {
        let conf_dir = normalize_conf_dir(&config.conf_dir);
        let c_conf_dir = CString::new(conf_dir.as_str())?;
        let dll_path = CString::new(config.library.library_path().to_string_lossy().as_bytes())?;

        let object = match &config.license {
            License::Directory(dir) => {
                let license_dir = dir
                    .as_ref()
                    .map(|d| CString::new(d.to_string_lossy().as_bytes()))
                    .transpose()?;
                let license_ptr = license_dir.as_ref().map_or(ptr::null(), |d| d.as_ptr());
                create_object(&api, ObjectKind::Api("FacerecService"), |e| unsafe {
                    api.facerec_service_constructor3(
                        ptr::null_mut(),
                        c_conf_dir.as_ptr(),
                        license_ptr,
                        dll_path.as_ptr(),
                        e,
                    )
                })?
            }
            License::Body(body) => {
                let license = CString::new(body.as_str())?;
                create_object(&api, ObjectKind::Api("FacerecService"), |e| unsafe {
                    api.facerec_service_constructor5(
                        ptr::null_mut(),
                        c_conf_dir.as_ptr(),
                        license.as_ptr(),
                        dll_path.as_ptr(),
                        e,
                    )
                })?
            }
        };

        let service = Self { object, conf_dir };
        let version = service.version()?;
        if version != LIBFACEREC_VERSION {
            warn!(
                "Library version {} differs from the bindings version {}",
                version, LIBFACEREC_VERSION
            );
        }
        info!(
            "Created facerec service {} with conf dir {}",
            version, service.conf_dir
        );
        Ok(service)
    }

    fn api(&self) -> &dyn FacerecApi {
        self.object.api()
    }

    fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    /// Configuration directory, always ending with `/`.
    pub fn conf_dir(&self) -> &str {
        &self.conf_dir
    }

    /// Version string reported by the loaded library.
    pub fn version(&self) -> Result<String> {
        let api = self.api();
        collect_string(|stream, write| call(api, |e| unsafe { api.get_version(stream, write, e) }))
    }

    /// Creates a face detector from a capturer `.xml` file.
    pub fn create_capturer(&self, config: &Config) -> Result<Capturer> {
        let prepared = config.prepare(&self.conf_dir)?;
        debug!("Creating capturer from {}", config.config_filepath);
        let api = self.api();
        let object = create_object(self.object.api_arc(), ObjectKind::Api("Capturer"), |e| unsafe {
            api.facerec_service_create_capturer_e(self.raw(), &prepared.as_args(), e)
        })?;
        Ok(Capturer::new(object))
    }

    /// Creates a recognizer from a method `.xml` file.
    ///
    /// `processing` enables template creation, `matching` enables comparison
    /// and search; disabling either saves memory.
    pub fn create_recognizer(
        &self,
        ini_file: &str,
        processing: bool,
        matching: bool,
        processing_less_memory_consumption: bool,
    ) -> Result<Recognizer> {
        let path = CString::new(format!("{}{}", self.conf_dir, ini_file))?;
        debug!("Creating recognizer from {}", ini_file);
        let api = self.api();
        let object = create_object(self.object.api_arc(), ObjectKind::Api("Recognizer"), |e| unsafe {
            api.facerec_service_create_recognizer2(
                self.raw(),
                path.as_ptr(),
                processing as i32,
                matching as i32,
                processing_less_memory_consumption as i32,
                e,
            )
        })?;
        Ok(Recognizer::new(object))
    }

    /// Creates a multi-stream tracking and recognition worker.
    pub fn create_video_worker(&self, params: &VideoWorkerParams) -> Result<VideoWorker> {
        VideoWorker::create(self, params)
    }

    /// Reads a sample previously written with [`RawSample::save`].
    pub fn load_raw_sample(&self, reader: &mut impl Read) -> Result<RawSample> {
        let api = self.api();
        let mut adapter = ReadAdapter::new(reader);
        let stream = adapter.as_stream();
        let result = create_object(self.object.api_arc(), ObjectKind::Api("RawSample"), |e| unsafe {
            api.facerec_service_load_raw_sample(self.raw(), stream, ReadAdapter::READ_FUNC, e)
        });
        adapter.finish()?;
        Ok(RawSample::new(result?))
    }

    pub fn create_camera_calibrator(&self) -> Result<CameraCalibrator> {
        let api = self.api();
        let object = create_object(
            self.object.api_arc(),
            ObjectKind::Api("CameraCalibrator"),
            |e| unsafe { api.facerec_service_create_camera_calibrator(self.raw(), e) },
        )?;
        Ok(CameraCalibrator::new(object))
    }

    /// Creates an empty dynamic index described by `config`.
    ///
    /// `config` must at least name the `"modification"` and `"version"` of
    /// the recognition method, and may set `"max_license_count"`.
    pub fn create_dynamic_template_index(&self, config: &Context) -> Result<DynamicTemplateIndex> {
        let api = self.api();
        let object = create_object(
            self.object.api_arc(),
            ObjectKind::DynamicTemplateIndex,
            |e| unsafe {
                api.facerec_service_create_dynamic_template_index_2(
                    self.raw(),
                    config.raw() as *const c_void,
                    e,
                )
            },
        )?;
        Ok(DynamicTemplateIndex::new(object))
    }

    /// Creates a processing block whose `"unit_type"` is set in `config`.
    pub fn create_processing_block(&self, config: &Context) -> Result<ProcessingBlock> {
        let api = self.api();
        let object = create_object(self.object.api_arc(), ObjectKind::ProcessingBlock, |e| unsafe {
            api.facerec_service_processing_block_create_processing_block(
                self.raw(),
                config.raw(),
                e,
            )
        })?;
        Ok(ProcessingBlock::new(object))
    }

    /// Keeps loaded models in memory after the objects using them are gone.
    pub fn keep_algorithms_cache(&self) -> Result<()> {
        self.toggle_algorithms_cache(true)
    }

    /// Releases cached models and stops caching new ones.
    pub fn free_algorithms_cache(&self) -> Result<()> {
        self.toggle_algorithms_cache(false)
    }

    fn toggle_algorithms_cache(&self, keep: bool) -> Result<()> {
        let api = self.api();
        call(api, |e| unsafe {
            api.facerec_service_toggle_algorithms_cache_kepp(keep as i32, e)
        })
    }

    /// Asks the license server for a fresh online license.
    pub fn force_online_license_update(&self) -> Result<()> {
        let api = self.api();
        call(api, |e| unsafe {
            api.facerec_service_force_online_license_update(self.raw(), e)
        })
    }

    pub(crate) fn api_arc(&self) -> &Arc<dyn FacerecApi> {
        self.object.api_arc()
    }

    pub(crate) fn raw_handle(&self) -> RawHandle {
        self.raw()
    }
}

