//! Font sizing that makes a single line of text fill its container.
//!
//! The search only needs a way to measure the rendered width at a given font
//! size. The page hands us its container geometry and [`GlyphMetrics`] stands
//! in for the browser's text layout.

use serde::Serialize;

pub const MIN_FONT_SIZE: u32 = 10;
pub const MAX_FONT_SIZE: u32 = 500;

/// Rendered width of some fixed text at a font size, in pixels.
pub trait Measure {
    fn text_width(&mut self, font_size: u32) -> f64;
}

impl<F> Measure for F
where
    F: FnMut(u32) -> f64,
{
    fn text_width(&mut self, font_size: u32) -> f64 {
        self(font_size)
    }
}

/// Content width of the container: client width minus horizontal padding.
pub fn available_width(client_width: f64, padding_left: f64, padding_right: f64) -> f64 {
    let padding = padding_left + padding_right;
    client_width - if padding.is_nan() { 0.0 } else { padding }
}

/// Largest font size in `[MIN_FONT_SIZE, MAX_FONT_SIZE]` whose measured width
/// fits `available`.
///
/// Returns `None` without measuring anything when there is no room yet
/// (hidden or not laid out). When even the minimum overflows the result is
/// still `MIN_FONT_SIZE`.
pub fn fit_font_size<M: Measure + ?Sized>(available: f64, measure: &mut M) -> Option<u32> {
    if !(available > 0.0) {
        return None;
    }

    // low fits (or is the lower bound), high overflows (or is the upper bound)
    let mut low = MIN_FONT_SIZE;
    let mut high = MAX_FONT_SIZE;

    while high - low > 1 {
        let mid = (low + high) / 2;
        if measure.text_width(mid) <= available {
            low = mid;
        } else {
            high = mid;
        }
    }

    // high was never probed if every midpoint fit
    if high == MAX_FONT_SIZE && low == MAX_FONT_SIZE - 1 && measure.text_width(high) <= available {
        return Some(high);
    }

    Some(low)
}

/// Approximate single-line advance widths, in ems, for a proportional sans.
#[derive(Debug, Clone)]
pub struct GlyphMetrics<'a> {
    text: &'a str,
    ems: f64,
}

impl<'a> GlyphMetrics<'a> {
    pub fn new(text: &'a str) -> Self {
        let ems = text.chars().map(advance).sum();
        Self { text, ems }
    }

    pub fn text(&self) -> &str {
        self.text
    }

    pub fn ems(&self) -> f64 {
        self.ems
    }
}

impl Measure for GlyphMetrics<'_> {
    fn text_width(&mut self, font_size: u32) -> f64 {
        self.ems * f64::from(font_size)
    }
}

fn advance(ch: char) -> f64 {
    match ch {
        'i' | 'l' | 'j' | '\'' | '.' | ',' | ':' | ';' | '!' | '|' => 0.28,
        ' ' => 0.28,
        'f' | 't' | 'r' | 'I' => 0.36,
        'm' | 'w' => 0.84,
        'M' | 'W' | '@' => 0.92,
        '0'..='9' => 0.56,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_lowercase() => 0.54,
        c if c.is_control() => 0.0,
        // wide scripts and emoji
        c if c.len_utf8() > 2 => 1.0,
        _ => 0.6,
    }
}

/// What the page applies to the fitted element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitOutcome {
    pub font_size: Option<u32>,
    pub available_width: f64,
}

/// Fits `text` into a container of the given geometry.
///
/// Text with no visible width has nothing to fit and leaves the size unset.
pub fn fit_text(text: &str, client_width: f64, padding_left: f64, padding_right: f64) -> FitOutcome {
    let available = available_width(client_width, padding_left, padding_right);
    let mut metrics = GlyphMetrics::new(text);
    let font_size = if metrics.ems() > 0.0 {
        fit_font_size(available, &mut metrics)
    } else {
        None
    };
    FitOutcome {
        font_size,
        available_width: available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(per_px: f64) -> impl FnMut(u32) -> f64 {
        move |size| f64::from(size) * per_px
    }

    #[test]
    fn chosen_size_is_the_last_that_fits() {
        for width in [61.0, 100.0, 512.5, 999.0, 1234.0, 2990.0] {
            let mut measure = linear(6.0);
            let size = fit_font_size(width, &mut measure).unwrap();
            assert!(measure(size) <= width, "width {width} size {size}");
            assert!(measure(size + 1) > width, "width {width} size {size}");
        }
    }

    #[test]
    fn oversized_container_uses_max() {
        let mut measure = linear(1.0);
        assert_eq!(fit_font_size(10_000.0, &mut measure), Some(MAX_FONT_SIZE));
        assert_eq!(fit_font_size(499.5, &mut measure), Some(MAX_FONT_SIZE - 1));
    }

    #[test]
    fn tiny_container_uses_min() {
        let mut measure = linear(50.0);
        assert_eq!(fit_font_size(3.0, &mut measure), Some(MIN_FONT_SIZE));
    }

    #[test]
    fn no_room_skips_measurement() {
        let mut calls = 0;
        let mut measure = |size: u32| {
            calls += 1;
            f64::from(size)
        };
        assert_eq!(fit_font_size(0.0, &mut measure), None);
        assert_eq!(fit_font_size(-12.0, &mut measure), None);
        assert_eq!(fit_font_size(f64::NAN, &mut measure), None);
        assert_eq!(calls, 0);
    }

    #[test]
    fn search_is_logarithmic() {
        let mut calls = 0;
        let mut measure = |size: u32| {
            calls += 1;
            f64::from(size) * 3.0
        };
        fit_font_size(700.0, &mut measure);
        assert!(calls <= 10, "{calls} measurements");
    }

    #[test]
    fn refit_is_idempotent() {
        let first = fit_text("Time to Midsummer Eve", 640.0, 16.0, 16.0);
        let second = fit_text("Time to Midsummer Eve", 640.0, 16.0, 16.0);
        assert_eq!(first, second);
        assert_eq!(first.available_width, 608.0);
    }

    #[test]
    fn longer_text_gets_smaller_font() {
        let short = fit_text("Time to Yule", 800.0, 0.0, 0.0).font_size.unwrap();
        let long = fit_text("Time to the very long awaited summer holiday", 800.0, 0.0, 0.0)
            .font_size
            .unwrap();
        assert!(long < short);
    }

    #[test]
    fn blank_text_leaves_size_unset() {
        assert_eq!(fit_text("", 640.0, 0.0, 0.0).font_size, None);
        assert_eq!(fit_text("\u{7}\t", 640.0, 0.0, 0.0).font_size, None);
        assert!(fit_text(" ", 640.0, 0.0, 0.0).font_size.is_some());
    }

    #[test]
    fn nan_padding_counts_as_zero() {
        assert_eq!(available_width(300.0, f64::NAN, 4.0), 300.0);
        assert_eq!(available_width(300.0, 8.0, 4.0), 288.0);
    }

    #[test]
    fn glyph_metrics_scale_with_font_size() {
        let mut metrics = GlyphMetrics::new("Wim");
        assert_eq!(metrics.text(), "Wim");
        let at_10 = metrics.text_width(10);
        let at_20 = metrics.text_width(20);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-9);
        assert!(metrics.ems() > 0.0);
    }
}
