//! Parsers and formatters for the composite mini-languages stored inside
//! individual parameter values.
//!
//! Every function here is pure. Parsers report a [`ParseError`] which the
//! typed accessors on [`ParameterMap`](crate::ParameterMap) turn into their
//! sentinel value; the error never crosses the public accessor surface.
//!
//! A single malformed or out-of-bounds element rejects the whole list.

use std::{fmt, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};

/// Inclusive bounds for the four rectangle coordinates of an [`Area`].
pub const AREA_COORDINATE_RANGE: RangeInclusive<i32> = -1000..=1000;
/// Inclusive bounds for the weight of an [`Area`].
pub const AREA_WEIGHT_RANGE: RangeInclusive<i32> = 1..=1000;

const INFINITY_TOKEN: &str = "Infinity";

/// Result alias for the structured value parsers.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Raised when a value does not match the grammar expected by its parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed {kind} `{input}`")]
    Malformed { kind: &'static str, input: String },
    #[error("area `{0}` is outside the allowed bounds")]
    AreaOutOfBounds(String),
    #[error("driver default area must be the only entry in `{0}`")]
    MisplacedDriverDefault(String),
}

impl ParseError {
    fn malformed(kind: &'static str, input: &str) -> Self {
        Self::Malformed {
            kind,
            input: input.to_string(),
        }
    }
}

/// Frame dimensions in pixels, written as `"<width>x<height>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Returned by getters when the stored size is absent or unreadable.
    pub const INVALID: Size = Size::new(-1, -1);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width >= 0 && self.height >= 0
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        parse_size(s)
    }
}

/// A signed coordinate pair written with the same `x` separator as [`Size`].
/// Used for the touch AF/AEC indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const INVALID: Point = Point::new(-1, -1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Minimum and maximum preview frame rate, scaled by 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub min: i32,
    pub max: i32,
}

impl Range {
    pub const INVALID: Range = Range::new(-1, -1);

    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// The driver streams at a fixed rate when both bounds agree.
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.min, self.max)
    }
}

/// Weighted rectangle in normalised sensor coordinates, used for focus and
/// metering hints. (-1000,-1000) is the upper left corner of the current field
/// of view and (1000,1000) the lower right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub weight: i32,
}

impl Area {
    /// `(0,0,0,0,0)`: lets the driver pick the area itself.
    pub const DRIVER_DEFAULT: Area = Area::new(0, 0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32, weight: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            weight,
        }
    }

    pub fn is_driver_default(&self) -> bool {
        *self == Self::DRIVER_DEFAULT
    }

    /// True when every coordinate and the weight are inside their bounds, or
    /// when this is the driver default area.
    pub fn is_valid(&self) -> bool {
        if self.is_driver_default() {
            return true;
        }

        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|coordinate| AREA_COORDINATE_RANGE.contains(coordinate))
            && AREA_WEIGHT_RANGE.contains(&self.weight)
    }

    pub fn center(&self) -> Point {
        Point::new(
            midpoint(self.left, self.right),
            midpoint(self.top, self.bottom),
        )
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{},{})",
            self.left, self.top, self.right, self.bottom, self.weight
        )
    }
}

/// Near, optimal and far focus distances in metres. `far` is commonly
/// infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusDistances {
    pub near: f32,
    pub optimal: f32,
    pub far: f32,
}

impl fmt::Display for FocusDistances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = [self.near, self.optimal, self.far];
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            if value.is_infinite() && value.is_sign_positive() {
                f.write_str(INFINITY_TOKEN)?;
            } else {
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

/// Parses `"<width>x<height>"`, tolerating surrounding whitespace.
pub fn parse_size(s: &str) -> ParseResult<Size> {
    let (width, height) = s
        .trim()
        .split_once('x')
        .ok_or_else(|| ParseError::malformed("size", s))?;

    match (parse_unsigned(width), parse_unsigned(height)) {
        (Some(width), Some(height)) => Ok(Size::new(width, height)),
        _ => Err(ParseError::malformed("size", s)),
    }
}

pub fn format_size(size: Size) -> String {
    size.to_string()
}

/// Parses a comma separated list of sizes. Order is preserved because drivers
/// report these lists in their own preference order.
pub fn parse_size_list(s: &str) -> ParseResult<Vec<Size>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(',').map(parse_size).collect()
}

pub fn format_size_list(sizes: &[Size]) -> String {
    join(sizes.iter().map(Size::to_string))
}

/// Parses a signed `"<x>x<y>"` pair.
pub fn parse_point(s: &str) -> ParseResult<Point> {
    let trimmed = s.trim();
    // `-` cannot be confused with the separator, so the first `x` splits.
    let (x, y) = trimmed
        .split_once('x')
        .ok_or_else(|| ParseError::malformed("point", s))?;

    match (parse_decimal::<i32>(x), parse_decimal::<i32>(y)) {
        (Some(x), Some(y)) => Ok(Point::new(x, y)),
        _ => Err(ParseError::malformed("point", s)),
    }
}

pub fn format_point(point: Point) -> String {
    point.to_string()
}

/// Parses `"<min>,<max>"`.
pub fn parse_range(s: &str) -> ParseResult<Range> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| ParseError::malformed("range", s))?;

    match (parse_unsigned(min), parse_unsigned(max)) {
        (Some(min), Some(max)) => Ok(Range::new(min, max)),
        _ => Err(ParseError::malformed("range", s)),
    }
}

pub fn format_range(range: Range) -> String {
    range.to_string()
}

/// Parses `"(min,max),(min,max),..."`.
pub fn parse_range_list(s: &str) -> ParseResult<Vec<Range>> {
    let tuples = parse_tuples::<2>(s, "range list", parse_unsigned)?;
    Ok(tuples
        .into_iter()
        .map(|[min, max]| Range::new(min, max))
        .collect())
}

pub fn format_range_list(ranges: &[Range]) -> String {
    join(ranges.iter().map(|range| format!("({range})")))
}

/// Parses `"(l,t,r,b,w),(l,t,r,b,w),..."`. Every area must satisfy
/// [`Area::is_valid`], and the driver default area is only accepted on its
/// own.
pub fn parse_area_list(s: &str) -> ParseResult<Vec<Area>> {
    let areas: Vec<Area> = parse_tuples::<5>(s, "area list", parse_decimal::<i32>)?
        .into_iter()
        .map(|[left, top, right, bottom, weight]| Area::new(left, top, right, bottom, weight))
        .collect();

    validate_areas(&areas).map_err(|err| match err {
        AreaViolation::OutOfBounds(area) => ParseError::AreaOutOfBounds(area.to_string()),
        AreaViolation::MisplacedDriverDefault => ParseError::MisplacedDriverDefault(s.to_string()),
    })?;

    Ok(areas)
}

pub fn format_area_list(areas: &[Area]) -> String {
    join(areas.iter().map(Area::to_string))
}

/// Parses `"near,optimal,far"` where each token is a float or `Infinity`.
pub fn parse_focus_distances(s: &str) -> ParseResult<FocusDistances> {
    let mut values = s.split(',').map(parse_distance);

    match (values.next(), values.next(), values.next(), values.next()) {
        (Some(Some(near)), Some(Some(optimal)), Some(Some(far)), None) => {
            Ok(FocusDistances { near, optimal, far })
        }
        _ => Err(ParseError::malformed("focus distances", s)),
    }
}

pub fn format_focus_distances(distances: FocusDistances) -> String {
    distances.to_string()
}

/// Parses a comma separated list of non-negative integers such as `"15,30"`.
pub fn parse_int_list(s: &str) -> ParseResult<Vec<i32>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }

    s.split(',')
        .map(|token| parse_unsigned(token).ok_or_else(|| ParseError::malformed("integer list", s)))
        .collect()
}

pub fn format_int_list(values: &[i32]) -> String {
    join(values.iter().map(i32::to_string))
}

pub(crate) enum AreaViolation {
    OutOfBounds(Area),
    MisplacedDriverDefault,
}

pub(crate) fn validate_areas(areas: &[Area]) -> std::result::Result<(), AreaViolation> {
    if let Some(area) = areas.iter().find(|area| !area.is_valid()) {
        return Err(AreaViolation::OutOfBounds(*area));
    }

    if areas.len() > 1 && areas.iter().any(Area::is_driver_default) {
        return Err(AreaViolation::MisplacedDriverDefault);
    }

    Ok(())
}

/// Decimal integer with an optional leading `-`. No `+`, no whitespace.
pub(crate) fn parse_decimal<T: FromStr>(token: &str) -> Option<T> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    token.parse().ok()
}

fn parse_unsigned(token: &str) -> Option<i32> {
    if token.starts_with('-') {
        return None;
    }

    parse_decimal(token)
}

fn parse_distance(token: &str) -> Option<f32> {
    if token == INFINITY_TOKEN {
        return Some(f32::INFINITY);
    }

    token.parse::<f32>().ok().filter(|value| value.is_finite())
}

/// Walks `(a,b,..),(a,b,..)` producing fixed-width integer tuples. An empty
/// input is an empty list.
fn parse_tuples<const N: usize>(
    s: &str,
    kind: &'static str,
    parse_field: fn(&str) -> Option<i32>,
) -> ParseResult<Vec<[i32; N]>> {
    let mut tuples = Vec::new();
    if s.is_empty() {
        return Ok(tuples);
    }

    let malformed = || ParseError::malformed(kind, s);
    let mut rest = s;
    loop {
        let body = rest.strip_prefix('(').ok_or_else(malformed)?;
        let (inner, tail) = body.split_once(')').ok_or_else(malformed)?;
        tuples.push(parse_tuple::<N>(inner, parse_field).ok_or_else(malformed)?);

        if tail.is_empty() {
            break;
        }
        rest = tail.strip_prefix(',').ok_or_else(malformed)?;
    }

    Ok(tuples)
}

fn parse_tuple<const N: usize>(inner: &str, parse_field: fn(&str) -> Option<i32>) -> Option<[i32; N]> {
    let mut values = [0; N];
    let mut fields = inner.split(',');
    for slot in values.iter_mut() {
        *slot = parse_field(fields.next()?)?;
    }

    if fields.next().is_some() {
        return None;
    }
    Some(values)
}

fn midpoint(a: i32, b: i32) -> i32 {
    // The mean of two i32 values always fits back into i32.
    ((i64::from(a) + i64::from(b)) / 2) as i32
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_size_with_surrounding_whitespace() {
        assert_eq!(parse_size(" 640x480 ").unwrap(), Size::new(640, 480));
        assert_eq!(format_size(Size::new(640, 480)), "640x480");
    }

    #[test]
    fn rejects_malformed_sizes() {
        for input in ["", "640", "640x", "x480", "-640x480", "640X480", "+640x480", "6 40x480", "640x480x1"] {
            assert!(parse_size(input).is_err(), "`{input}` should not parse");
        }
    }

    #[test]
    fn size_round_trips_for_non_negative_dimensions() {
        for size in [Size::new(0, 0), Size::new(1, 1), Size::new(4096, 3072), Size::new(i32::MAX, 7)] {
            assert_eq!(parse_size(&format_size(size)).unwrap(), size);
        }
    }

    #[test]
    fn size_list_preserves_order() {
        let sizes = parse_size_list("800x600,480x320").unwrap();
        assert_eq!(sizes, vec![Size::new(800, 600), Size::new(480, 320)]);
        assert_eq!(format_size_list(&sizes), "800x600,480x320");
    }

    #[test]
    fn empty_size_list_is_empty() {
        assert!(parse_size_list("").unwrap().is_empty());
    }

    #[test]
    fn one_bad_size_rejects_the_list() {
        assert!(parse_size_list("800x600,bogus,480x320").is_err());
        assert!(parse_size_list("800x600,").is_err());
    }

    #[test]
    fn parses_ranges() {
        assert_eq!(parse_range("10500,26623").unwrap(), Range::new(10500, 26623));
        assert!(parse_range("10500").is_err());
        assert!(parse_range("10500,26623,1").is_err());
        assert!(parse_range("-1,30000").is_err());
    }

    #[test]
    fn parses_range_list_in_driver_order() {
        let ranges = parse_range_list("(10500,26623),(15000,26623),(30000,30000)").unwrap();
        assert_eq!(
            ranges,
            vec![
                Range::new(10500, 26623),
                Range::new(15000, 26623),
                Range::new(30000, 30000),
            ]
        );
        assert!(ranges[2].is_fixed());
        assert_eq!(
            format_range_list(&ranges),
            "(10500,26623),(15000,26623),(30000,30000)"
        );
    }

    #[test]
    fn malformed_range_tuple_rejects_the_list() {
        for input in ["(1,2),(3)", "(1,2),", "(1,2)(3,4)", "(1,2", "1,2", "(1,2),(3,4,5)"] {
            assert!(parse_range_list(input).is_err(), "`{input}` should not parse");
        }
    }

    #[test]
    fn parses_area_list() {
        let areas = parse_area_list("(-10,-10,0,0,300),(0,0,10,10,700)").unwrap();
        assert_eq!(
            areas,
            vec![Area::new(-10, -10, 0, 0, 300), Area::new(0, 0, 10, 10, 700)]
        );
    }

    #[test]
    fn area_list_round_trips() {
        let areas = vec![
            Area::new(-1000, -1000, 1000, 1000, 1),
            Area::new(-200, 100, 50, 400, 1000),
        ];
        let text = format_area_list(&areas);
        assert_eq!(text, "(-1000,-1000,1000,1000,1),(-200,100,50,400,1000)");
        assert_eq!(parse_area_list(&text).unwrap(), areas);
    }

    #[test]
    fn out_of_bounds_area_rejects_the_list() {
        let err = parse_area_list("(0,0,10,10,700),(-1001,0,10,10,5)").unwrap_err();
        assert!(matches!(err, ParseError::AreaOutOfBounds(_)));

        let err = parse_area_list("(0,0,10,10,0)").unwrap_err();
        assert!(matches!(err, ParseError::AreaOutOfBounds(_)));

        assert!(parse_area_list("(0,0,10,10,1001)").is_err());
        assert!(parse_area_list("(0,0,10,10)").is_err());
        assert!(parse_area_list("(0,0,10,10,+5)").is_err());
    }

    #[test]
    fn driver_default_area_is_only_valid_alone() {
        assert_eq!(
            parse_area_list("(0,0,0,0,0)").unwrap(),
            vec![Area::DRIVER_DEFAULT]
        );

        let err = parse_area_list("(0,0,0,0,0),(0,0,10,10,700)").unwrap_err();
        assert!(matches!(err, ParseError::MisplacedDriverDefault(_)));
    }

    #[test]
    fn area_center_is_rectangle_midpoint() {
        assert_eq!(Area::new(-10, -20, 30, 40, 1).center(), Point::new(10, 10));
    }

    #[test]
    fn area_center_does_not_overflow_unchecked_fields() {
        let wide = Area::new(i32::MAX, i32::MIN, i32::MAX, i32::MIN, 1);
        assert_eq!(wide.center(), Point::new(i32::MAX, i32::MIN));
        assert_eq!(Area::new(i32::MIN, 0, i32::MAX, 0, 1).center(), Point::new(0, 0));
    }

    #[test]
    fn points_accept_negative_coordinates() {
        assert_eq!(parse_point("-1x-1").unwrap(), Point::INVALID);
        assert_eq!(parse_point("120x-40").unwrap(), Point::new(120, -40));
        assert_eq!(format_point(Point::new(120, -40)), "120x-40");
        assert!(parse_point("120").is_err());
    }

    #[test]
    fn parses_focus_distances_with_infinity() {
        let distances = parse_focus_distances("0.95,1.9,Infinity").unwrap();
        assert_eq!(distances.near, 0.95);
        assert_eq!(distances.optimal, 1.9);
        assert!(distances.far.is_infinite());
        assert_eq!(format_focus_distances(distances), "0.95,1.9,Infinity");

        assert!(parse_focus_distances("0.95,1.9").is_err());
        assert!(parse_focus_distances("0.95,1.9,infinity").is_err());
        assert!(parse_focus_distances("0.049,0.05,0.051,1").is_err());
    }

    #[test]
    fn parses_scalar_lists() {
        assert_eq!(parse_int_list("15,30").unwrap(), vec![15, 30]);
        assert!(parse_int_list("").unwrap().is_empty());
        assert!(parse_int_list("15,,30").is_err());
        assert_eq!(format_int_list(&[15, 30]), "15,30");
    }

    #[test]
    fn decimal_tokens_reject_plus_and_hex() {
        assert_eq!(parse_decimal::<i32>("-42"), Some(-42));
        assert_eq!(parse_decimal::<i32>("+42"), None);
        assert_eq!(parse_decimal::<i32>("0x2a"), None);
        assert_eq!(parse_decimal::<i32>("-"), None);
        assert_eq!(parse_decimal::<i32>(" 42"), None);
        assert_eq!(parse_decimal::<i32>("99999999999"), None);
        assert_eq!(parse_decimal::<i64>("99999999999"), Some(99_999_999_999));
    }

    fn valid_area() -> impl Strategy<Value = Area> {
        (
            -1000i32..=1000,
            -1000i32..=1000,
            -1000i32..=1000,
            -1000i32..=1000,
            1i32..=1000,
        )
            .prop_map(|(left, top, right, bottom, weight)| Area::new(left, top, right, bottom, weight))
    }

    proptest! {
        /// Any non-negative size reads back unchanged.
        #[test]
        fn prop_size_round_trips(width in 0i32.., height in 0i32..) {
            let size = Size::new(width, height);
            prop_assert_eq!(parse_size(&format_size(size)).unwrap(), size);
        }

        /// Any list of in-bounds areas reads back unchanged and in order.
        #[test]
        fn prop_area_list_round_trips(areas in prop::collection::vec(valid_area(), 1..8)) {
            let text = format_area_list(&areas);
            let parsed = parse_area_list(&text).unwrap();
            prop_assert!(parsed.iter().all(Area::is_valid));
            prop_assert_eq!(parsed, areas);
        }
    }
}
