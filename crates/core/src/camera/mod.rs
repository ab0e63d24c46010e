//! Typed accessors for the well-known camera keys.
//!
//! Setters format through [`crate::structured`] and write a single key.
//! Getters never fail: absent or unreadable values come back as the sentinel
//! of their type (`Size::INVALID`, `Range::INVALID`, an empty list, ...).

use tracing::warn;

use crate::{
    keys,
    structured::{
        self, validate_areas, Area, AreaViolation, FocusDistances, ParseResult, Point, Range, Size,
    },
    ParameterMap, ParamsError, Result,
};

impl ParameterMap {
    pub fn set_preview_size(&mut self, size: Size) {
        self.put(keys::PREVIEW_SIZE, structured::format_size(size));
    }

    pub fn preview_size(&self) -> Size {
        self.structured_or(keys::PREVIEW_SIZE, structured::parse_size, Size::INVALID)
    }

    pub fn supported_preview_sizes(&self) -> Vec<Size> {
        self.list_or_empty(keys::SUPPORTED_PREVIEW_SIZES, structured::parse_size_list)
    }

    pub fn set_picture_size(&mut self, size: Size) {
        self.put(keys::PICTURE_SIZE, structured::format_size(size));
    }

    pub fn picture_size(&self) -> Size {
        self.structured_or(keys::PICTURE_SIZE, structured::parse_size, Size::INVALID)
    }

    pub fn supported_picture_sizes(&self) -> Vec<Size> {
        self.list_or_empty(keys::SUPPORTED_PICTURE_SIZES, structured::parse_size_list)
    }

    /// Only meaningful when [`supported_video_sizes`](Self::supported_video_sizes)
    /// is non-empty.
    pub fn set_video_size(&mut self, size: Size) {
        self.put(keys::VIDEO_SIZE, structured::format_size(size));
    }

    pub fn video_size(&self) -> Size {
        self.structured_or(keys::VIDEO_SIZE, structured::parse_size, Size::INVALID)
    }

    /// An empty list means the camera has a single output shared by preview
    /// and video.
    pub fn supported_video_sizes(&self) -> Vec<Size> {
        self.list_or_empty(keys::SUPPORTED_VIDEO_SIZES, structured::parse_size_list)
    }

    /// Preferred preview size while recording, or `Size::INVALID` (`-1x-1`)
    /// when the camera has no separate video output.
    pub fn preferred_preview_size_for_video(&self) -> Size {
        if self.supported_video_sizes().is_empty() {
            return Size::INVALID;
        }

        self.structured_or(
            keys::PREFERRED_PREVIEW_SIZE_FOR_VIDEO,
            structured::parse_size,
            Size::INVALID,
        )
    }

    pub fn supported_hfr_sizes(&self) -> Vec<Size> {
        self.list_or_empty(keys::SUPPORTED_HFR_SIZES, structured::parse_size_list)
    }

    /// Size of the image shown right after a capture.
    pub fn set_postview_size(&mut self, size: Size) {
        self.put(keys::POSTVIEW_SIZE, structured::format_size(size));
    }

    pub fn postview_size(&self) -> Size {
        self.structured_or(keys::POSTVIEW_SIZE, structured::parse_size, Size::INVALID)
    }

    /// Thumbnail dimensions live in two integer keys rather than one `WxH`.
    pub fn set_jpeg_thumbnail_size(&mut self, size: Size) {
        self.put(keys::JPEG_THUMBNAIL_WIDTH, size.width.to_string());
        self.put(keys::JPEG_THUMBNAIL_HEIGHT, size.height.to_string());
    }

    pub fn jpeg_thumbnail_size(&self) -> Size {
        let width = self.get_int(keys::JPEG_THUMBNAIL_WIDTH);
        let height = self.get_int(keys::JPEG_THUMBNAIL_HEIGHT);
        let size = Size::new(width, height);
        if size.is_valid() {
            size
        } else {
            Size::INVALID
        }
    }

    pub fn set_preview_frame_rate(&mut self, fps: i32) {
        self.put(keys::PREVIEW_FRAME_RATE, fps.to_string());
    }

    pub fn preview_frame_rate(&self) -> i32 {
        self.get_int(keys::PREVIEW_FRAME_RATE)
    }

    pub fn supported_preview_frame_rates(&self) -> Vec<i32> {
        self.list_or_empty(keys::SUPPORTED_PREVIEW_FRAME_RATES, structured::parse_int_list)
    }

    pub fn set_preview_fps_range(&mut self, range: Range) {
        self.put(keys::PREVIEW_FPS_RANGE, structured::format_range(range));
    }

    pub fn preview_fps_range(&self) -> Range {
        self.structured_or(keys::PREVIEW_FPS_RANGE, structured::parse_range, Range::INVALID)
    }

    /// Sorted by the driver from small to large, first by maximum and then by
    /// minimum fps.
    pub fn supported_preview_fps_ranges(&self) -> Vec<Range> {
        self.list_or_empty(keys::SUPPORTED_PREVIEW_FPS_RANGE, structured::parse_range_list)
    }

    pub fn set_preview_format(&mut self, format: &str) -> Result<()> {
        self.set(keys::PREVIEW_FORMAT, format)
    }

    pub fn preview_format(&self) -> Option<&str> {
        self.get(keys::PREVIEW_FORMAT)
    }

    pub fn set_picture_format(&mut self, format: &str) -> Result<()> {
        self.set(keys::PICTURE_FORMAT, format)
    }

    pub fn picture_format(&self) -> Option<&str> {
        self.get(keys::PICTURE_FORMAT)
    }

    pub fn set_preview_frame_rate_mode(&mut self, mode: &str) -> Result<()> {
        self.set(keys::PREVIEW_FRAME_RATE_MODE, mode)
    }

    pub fn preview_frame_rate_mode(&self) -> Option<&str> {
        self.get(keys::PREVIEW_FRAME_RATE_MODE)
    }

    /// Writes the focus areas. An empty slice stores the driver default area.
    pub fn set_focus_areas(&mut self, areas: &[Area]) -> Result<()> {
        self.set_areas(keys::FOCUS_AREAS, areas)
    }

    pub fn focus_areas(&self) -> Vec<Area> {
        self.list_or_empty(keys::FOCUS_AREAS, structured::parse_area_list)
    }

    /// Writes the metering areas. An empty slice stores the driver default
    /// area.
    pub fn set_metering_areas(&mut self, areas: &[Area]) -> Result<()> {
        self.set_areas(keys::METERING_AREAS, areas)
    }

    pub fn metering_areas(&self) -> Vec<Area> {
        self.list_or_empty(keys::METERING_AREAS, structured::parse_area_list)
    }

    /// `0` means focus areas are unsupported.
    pub fn max_num_focus_areas(&self) -> i32 {
        self.get_int(keys::MAX_NUM_FOCUS_AREAS)
    }

    pub fn max_num_metering_areas(&self) -> i32 {
        self.get_int(keys::MAX_NUM_METERING_AREAS)
    }

    /// Center of the first focus area, if the caller picked one.
    pub fn focus_area_center(&self) -> Option<Point> {
        first_area_center(&self.focus_areas())
    }

    /// Center of the first metering area, if the caller picked one.
    pub fn metering_area_center(&self) -> Option<Point> {
        first_area_center(&self.metering_areas())
    }

    pub fn set_touch_index_aec(&mut self, point: Point) {
        self.put(keys::TOUCH_INDEX_AEC, structured::format_point(point));
    }

    pub fn touch_index_aec(&self) -> Point {
        self.structured_or(keys::TOUCH_INDEX_AEC, structured::parse_point, Point::INVALID)
    }

    pub fn set_touch_index_af(&mut self, point: Point) {
        self.put(keys::TOUCH_INDEX_AF, structured::format_point(point));
    }

    pub fn touch_index_af(&self) -> Point {
        self.structured_or(keys::TOUCH_INDEX_AF, structured::parse_point, Point::INVALID)
    }

    pub fn focus_distances(&self) -> Option<FocusDistances> {
        let raw = self.get(keys::FOCUS_DISTANCES)?;
        structured::parse_focus_distances(raw)
            .map_err(|err| warn!(key = keys::FOCUS_DISTANCES, %err, "unreadable focus distances"))
            .ok()
    }

    fn set_areas(&mut self, key: &str, areas: &[Area]) -> Result<()> {
        if areas.is_empty() {
            self.put(key, Area::DRIVER_DEFAULT.to_string());
            return Ok(());
        }

        validate_areas(areas).map_err(|violation| match violation {
            AreaViolation::OutOfBounds(area) => ParamsError::invalid_value(key, area.to_string()),
            AreaViolation::MisplacedDriverDefault => {
                ParamsError::invalid_value(key, structured::format_area_list(areas))
            }
        })?;

        self.put(key, structured::format_area_list(areas));
        Ok(())
    }

    fn structured_or<T>(&self, key: &str, parse: fn(&str) -> ParseResult<T>, sentinel: T) -> T {
        let Some(raw) = self.get(key) else {
            return sentinel;
        };

        match parse(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, %err, "unreadable parameter, using sentinel");
                sentinel
            }
        }
    }

    fn list_or_empty<T>(&self, key: &str, parse: fn(&str) -> ParseResult<Vec<T>>) -> Vec<T> {
        self.structured_or(key, parse, Vec::new())
    }
}

fn first_area_center(areas: &[Area]) -> Option<Point> {
    areas
        .first()
        .filter(|area| !area.is_driver_default())
        .map(Area::center)
}
