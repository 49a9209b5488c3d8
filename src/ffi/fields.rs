//! Field ids understood by `StructStorage_get_*`.
//!
//! The numbering is part of the engine ABI. `SEARCH_RESULT_SCORE` and the
//! engine's infrared-liveness field share id 36; only the former is read here.

pub const STREAM_ID: i32 = 0;
pub const FRAME_ID: i32 = 1;
pub const SAMPLES_COUNT: i32 = 2;
pub const SAMPLES: i32 = 3;
pub const WEAK_SAMPLES: i32 = 4;
pub const SAMPLES_QUALITY: i32 = 5;

pub const QUALITY: i32 = 6;
pub const TEMPL: i32 = 7;

pub const SEARCH_RESULT_SIZE: i32 = 8;
pub const SEARCH_RESULT_PERSON_IDS: i32 = 9;
pub const SEARCH_RESULT_ELEMENT_IDS: i32 = 10;
pub const SEARCH_RESULT_DISTANCE: i32 = 11;
pub const SEARCH_RESULT_FA_R: i32 = 12;
pub const SEARCH_RESULT_FR_R: i32 = 13;
pub const SEARCH_RESULT_SCORE: i32 = 36;

pub const FIRST_FRAME_ID: i32 = 14;
pub const LAST_FRAME_ID: i32 = 15;
pub const BEST_QUALITY: i32 = 16;
pub const BEST_QUALITY_FRAME_ID: i32 = 17;
// The engine fills `SAMPLES` and `TEMPL` for tracking-lost events; these
// two ids are reserved but left empty.
pub const BEST_QUALITY_SAMPLE: i32 = 18;
pub const BEST_QUALITY_TEMPLATE: i32 = 19;
pub const TRACK_ID: i32 = 20;

pub const GOOD_LIGHT_AND_BLUR_SAMPLES: i32 = 21;
pub const GOOD_ANGLES_SAMPLES: i32 = 22;
pub const DETECTOR_CONFIRMED_SAMPLES: i32 = 23;
pub const DEPTH_LIVENESS_CONFIRMED_SAMPLES: i32 = 24;
pub const GOOD_FACE_SIZE_SAMPLES: i32 = 25;

pub const STI_PERSON_ID: i32 = 26;
pub const STI_PERSON_ID_SET: i32 = 27;

pub const SAMPLES_TRACK_AGE_GENDER_SET: i32 = 28;
pub const SAMPLES_TRACK_GENDER: i32 = 29;
pub const SAMPLES_TRACK_AGE: i32 = 30;
pub const SAMPLES_TRACK_AGE_YEARS: i32 = 31;
pub const SAMPLES_TRACK_EMOTIONS_SET: i32 = 32;
pub const SAMPLES_TRACK_EMOTIONS_COUNT: i32 = 33;
pub const SAMPLES_TRACK_EMOTIONS_CONFIDENCE: i32 = 34;
pub const SAMPLES_TRACK_EMOTIONS_EMOTION: i32 = 35;
