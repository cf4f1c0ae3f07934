//! Power-of-two sampling for memory-bounded decoding.
//!
//! Decoding at a sample size of `n` produces an image `1/n` the width and
//! height of the source, so peak memory drops by `n²`. The divisor is picked
//! from the source dimensions (read in a bounds-only pass) and the display
//! size the caller actually needs.

use image::RgbaImage;

use super::DecodeError;

/// Compute the power-of-two sample size for a requested display size.
///
/// Starting from 1, the divisor doubles while both half-dimensions divided by
/// it still exceed the request. The result never makes the decoded image
/// smaller than requested; it may be up to twice as large.
///
/// A non-positive request, or a source that already fits, yields 1.
///
/// # Example
///
/// ```
/// use utilkit_core::decode::calculate_in_sample_size;
///
/// assert_eq!(calculate_in_sample_size(4000, 3000, 400, 300), 8);
/// assert_eq!(calculate_in_sample_size(100, 100, 200, 200), 1);
/// ```
pub fn calculate_in_sample_size(width: u32, height: u32, req_width: i32, req_height: i32) -> u32 {
    if req_width <= 0 || req_height <= 0 {
        return 1;
    }
    let (req_width, req_height) = (req_width as u32, req_height as u32);

    let mut in_sample_size = 1u32;
    if height > req_height || width > req_width {
        let half_height = height / 2;
        let half_width = width / 2;
        while half_height / in_sample_size > req_height && half_width / in_sample_size > req_width {
            in_sample_size *= 2;
        }
    }
    in_sample_size
}

/// Output dimension for a source dimension at the given sample size.
#[inline]
pub(crate) fn sampled_dimension(dim: u32, sample_size: u32) -> u32 {
    (dim / sample_size.max(1)).max(1)
}

/// Box-averaging downsampler fed one RGBA source row at a time.
///
/// Only one output row of running sums is held besides the output buffer, so
/// a decoder that produces rows can sample without materialising the source.
/// Trailing rows/columns that do not fill a whole block are folded into the
/// last output row/column.
pub(crate) struct RowSampler {
    src_width: u32,
    src_height: u32,
    sample_size: u32,
    dst_width: u32,
    dst_height: u32,
    col_counts: Vec<u64>,
    sums: Vec<u64>,
    band_rows: u64,
    next_row: u32,
    out: Vec<u8>,
}

impl RowSampler {
    pub(crate) fn new(src_width: u32, src_height: u32, sample_size: u32) -> Self {
        let sample_size = sample_size.max(1);
        let dst_width = sampled_dimension(src_width, sample_size);
        let dst_height = sampled_dimension(src_height, sample_size);

        let (col_counts, sums) = if sample_size > 1 {
            let mut counts = vec![0u64; dst_width as usize];
            for x in 0..src_width {
                counts[((x / sample_size).min(dst_width - 1)) as usize] += 1;
            }
            (counts, vec![0u64; dst_width as usize * 4])
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            src_width,
            src_height,
            sample_size,
            dst_width,
            dst_height,
            col_counts,
            sums,
            band_rows: 0,
            next_row: 0,
            out: Vec::with_capacity(dst_width as usize * dst_height as usize * 4),
        }
    }

    /// Bytes held by the sampler once all rows are pushed.
    pub(crate) fn footprint(src_width: u32, src_height: u32, sample_size: u32) -> u64 {
        let sample_size = sample_size.max(1);
        let dst_width = sampled_dimension(src_width, sample_size) as u64;
        let dst_height = sampled_dimension(src_height, sample_size) as u64;
        let sums = if sample_size > 1 { dst_width * 5 * 8 } else { 0 };
        dst_width * dst_height * 4 + sums
    }

    /// Feed the next source row, `src_width × 4` RGBA bytes. Extra rows are ignored.
    pub(crate) fn push_row(&mut self, rgba: &[u8]) {
        if self.next_row >= self.src_height {
            return;
        }
        let y = self.next_row;
        self.next_row += 1;

        if self.sample_size == 1 {
            self.out.extend_from_slice(&rgba[..self.src_width as usize * 4]);
            return;
        }

        let last_col = self.dst_width - 1;
        for (x, px) in rgba.chunks_exact(4).take(self.src_width as usize).enumerate() {
            let ox = ((x as u32 / self.sample_size).min(last_col)) as usize * 4;
            for c in 0..4 {
                self.sums[ox + c] += px[c] as u64;
            }
        }
        self.band_rows += 1;

        let last_row = self.dst_height - 1;
        let band = (y / self.sample_size).min(last_row);
        let band_done = y + 1 == self.src_height
            || ((y + 1) / self.sample_size).min(last_row) != band;
        if band_done {
            self.flush_band();
        }
    }

    fn flush_band(&mut self) {
        for (ox, cols) in self.col_counts.iter().enumerate() {
            let count = (cols * self.band_rows).max(1);
            for c in 0..4 {
                let sum = &mut self.sums[ox * 4 + c];
                self.out.push(((*sum + count / 2) / count) as u8);
                *sum = 0;
            }
        }
        self.band_rows = 0;
    }

    /// The sampled image, or an error if fewer rows were pushed than the source has.
    pub(crate) fn finish(self) -> Result<RgbaImage, DecodeError> {
        if self.next_row < self.src_height {
            return Err(DecodeError::CorruptedFile(format!(
                "image data ended after {} of {} rows",
                self.next_row, self.src_height
            )));
        }
        RgbaImage::from_raw(self.dst_width, self.dst_height, self.out)
            .ok_or_else(|| DecodeError::CorruptedFile("sampled buffer size mismatch".to_string()))
    }
}

/// Downsample a decoded image by averaging each `sample_size × sample_size` block.
pub(crate) fn subsample(img: RgbaImage, sample_size: u32) -> RgbaImage {
    let (width, height) = img.dimensions();
    if sample_size <= 1 || width == 0 || height == 0 {
        return img;
    }
    let mut sampler = RowSampler::new(width, height, sample_size);
    for row in img.as_raw().chunks_exact(width as usize * 4) {
        sampler.push_row(row);
    }
    match sampler.finish() {
        Ok(sampled) => sampled,
        Err(_) => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_photo_for_small_view() {
        // d=4 halves are 1000x750 and d=8 halves are 500x375, both still above
        // 400x300; d=16 gives 250x187 and stops the loop.
        assert_eq!(calculate_in_sample_size(4000, 3000, 400, 300), 8);
    }

    #[test]
    fn test_source_smaller_than_request() {
        assert_eq!(calculate_in_sample_size(100, 80, 200, 200), 1);
    }

    #[test]
    fn test_source_equal_to_request() {
        assert_eq!(calculate_in_sample_size(400, 300, 400, 300), 1);
    }

    #[test]
    fn test_non_positive_request() {
        assert_eq!(calculate_in_sample_size(4000, 3000, 0, 300), 1);
        assert_eq!(calculate_in_sample_size(4000, 3000, 400, 0), 1);
        assert_eq!(calculate_in_sample_size(4000, 3000, -1, -1), 1);
    }

    #[test]
    fn test_only_one_axis_exceeds() {
        // Width exceeds, but height halves never exceed the request.
        assert_eq!(calculate_in_sample_size(4000, 300, 100, 300), 1);
    }

    #[test]
    fn test_exactly_double() {
        // halves 200x150 are not strictly greater than 200x150.
        assert_eq!(calculate_in_sample_size(400, 300, 200, 150), 1);
        assert_eq!(calculate_in_sample_size(402, 302, 200, 150), 2);
    }

    #[test]
    fn test_sampled_dimension() {
        assert_eq!(sampled_dimension(4000, 8), 500);
        assert_eq!(sampled_dimension(5, 8), 1);
        assert_eq!(sampled_dimension(10, 0), 10);
    }

    #[test]
    fn test_subsample_averages_blocks() {
        let mut img = RgbaImage::new(4, 2);
        for (x, _, px) in img.enumerate_pixels_mut() {
            let v = if x < 2 { 100 } else { 200 };
            *px = image::Rgba([v, v, v, 255]);
        }

        let out = subsample(img, 2);
        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(out.get_pixel(0, 0).0, [100, 100, 100, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_subsample_identity() {
        let img = RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 4]));
        assert_eq!(subsample(img.clone(), 1), img);
    }

    #[test]
    fn test_subsample_folds_remainder() {
        let img = RgbaImage::from_pixel(5, 5, image::Rgba([10, 20, 30, 255]));
        let out = subsample(img, 2);
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(1, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_row_sampler_folds_trailing_rows() {
        // 3 rows at sample size 2: the third row joins the only output row.
        let mut sampler = RowSampler::new(2, 3, 2);
        sampler.push_row(&[0, 0, 0, 255, 0, 0, 0, 255]);
        sampler.push_row(&[30, 0, 0, 255, 30, 0, 0, 255]);
        sampler.push_row(&[60, 0, 0, 255, 60, 0, 0, 255]);

        let out = sampler.finish().unwrap();
        assert_eq!(out.dimensions(), (1, 1));
        assert_eq!(out.get_pixel(0, 0).0, [30, 0, 0, 255]);
    }

    #[test]
    fn test_row_sampler_identity_passes_rows_through() {
        let mut sampler = RowSampler::new(2, 1, 1);
        sampler.push_row(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(sampler.finish().unwrap().into_raw(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_row_sampler_missing_rows() {
        let mut sampler = RowSampler::new(4, 4, 2);
        sampler.push_row(&[0; 16]);
        assert!(matches!(sampler.finish(), Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_row_sampler_footprint_tracks_output() {
        // 1024x1024 at 8 is 128x128 RGBA plus one row of sums and column counts.
        assert_eq!(RowSampler::footprint(1024, 1024, 8), 128 * 128 * 4 + 128 * 40);
        assert_eq!(RowSampler::footprint(10, 10, 1), 400);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
