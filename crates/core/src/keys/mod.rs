//! Well-known parameter keys read and written by the typed accessors.
//!
//! The store treats every key identically; this is only the shared
//! vocabulary. Callers are free to use keys that do not appear here.

pub const PREVIEW_SIZE: &str = "preview-size";
pub const SUPPORTED_PREVIEW_SIZES: &str = "preview-size-values";
pub const PREVIEW_FORMAT: &str = "preview-format";
pub const SUPPORTED_PREVIEW_FORMATS: &str = "preview-format-values";
pub const PREVIEW_FRAME_RATE: &str = "preview-frame-rate";
pub const SUPPORTED_PREVIEW_FRAME_RATES: &str = "preview-frame-rate-values";
pub const PREVIEW_FPS_RANGE: &str = "preview-fps-range";
pub const SUPPORTED_PREVIEW_FPS_RANGE: &str = "preview-fps-range-values";
pub const PREVIEW_FRAME_RATE_MODE: &str = "preview-frame-rate-mode";
pub const SUPPORTED_PREVIEW_FRAME_RATE_MODES: &str = "preview-frame-rate-modes";

pub const PICTURE_SIZE: &str = "picture-size";
pub const SUPPORTED_PICTURE_SIZES: &str = "picture-size-values";
pub const PICTURE_FORMAT: &str = "picture-format";
pub const SUPPORTED_PICTURE_FORMATS: &str = "picture-format-values";
pub const POSTVIEW_SIZE: &str = "postview-size";
pub const JPEG_THUMBNAIL_WIDTH: &str = "jpeg-thumbnail-width";
pub const JPEG_THUMBNAIL_HEIGHT: &str = "jpeg-thumbnail-height";

pub const VIDEO_SIZE: &str = "video-size";
pub const SUPPORTED_VIDEO_SIZES: &str = "video-size-values";
pub const PREFERRED_PREVIEW_SIZE_FOR_VIDEO: &str = "preferred-preview-size-for-video";
pub const VIDEO_HIGH_FRAME_RATE: &str = "video-hfr";
pub const SUPPORTED_VIDEO_HIGH_FRAME_RATE_MODES: &str = "video-hfr-values";
pub const SUPPORTED_HFR_SIZES: &str = "hfr-size-values";

pub const FOCUS_AREAS: &str = "focus-areas";
pub const MAX_NUM_FOCUS_AREAS: &str = "max-num-focus-areas";
pub const METERING_AREAS: &str = "metering-areas";
pub const MAX_NUM_METERING_AREAS: &str = "max-num-metering-areas";
pub const FOCUS_DISTANCES: &str = "focus-distances";

pub const TOUCH_AF_AEC: &str = "touch-af-aec";
pub const SUPPORTED_TOUCH_AF_AEC: &str = "touch-af-aec-values";
pub const TOUCH_INDEX_AEC: &str = "touch-index-aec";
pub const TOUCH_INDEX_AF: &str = "touch-index-af";

pub const MAX_NUM_DETECTED_FACES_HW: &str = "max-num-detected-faces-hw";
pub const MAX_NUM_DETECTED_FACES_SW: &str = "max-num-detected-faces-sw";

pub const ZSL: &str = "zsl";
pub const SUPPORTED_ZSL_MODES: &str = "zsl-values";

pub const ISO_MODE: &str = "iso";
pub const SUPPORTED_ISO_MODES: &str = "iso-values";
