//! Row-streaming decoders.
//!
//! PNG rows are read one at a time from `png::Reader`, so a sampled or region
//! decode never holds more than one source row. JPEG goes through
//! `jpeg-decoder`, which scales in the DCT domain and hands back a buffer
//! already reduced by up to 8×.
//!
//! Each entry point returns `Ok(None)` for inputs it cannot stream
//! (interlaced PNG, CMYK JPEG); callers then fall back to a whole-image decode.

use std::io::{BufRead, Read, Seek};

use image::{ImageFormat, RgbaImage};
use jpeg_decoder::PixelFormat as JpegPixelFormat;
use png::{ColorType, Transformations};

use super::sample::{sampled_dimension, subsample, RowSampler};
use super::DecodeError;
use crate::bitmap::Region;

/// Identify the container from the buffered head of the stream without consuming it.
pub(crate) fn sniff_format<R: BufRead>(reader: &mut R) -> Result<ImageFormat, DecodeError> {
    let head = reader.fill_buf()?;
    if head.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    image::guess_format(head).map_err(|_| DecodeError::InvalidFormat)
}

/// Fail with `OutOfMemory` when `bytes` exceeds the caller's allocation budget.
pub(crate) fn check_budget(bytes: u64, max_alloc: Option<u64>) -> Result<(), DecodeError> {
    match max_alloc {
        Some(limit) if bytes > limit => {
            log::debug!("decode needs {} bytes, budget is {}", bytes, limit);
            Err(DecodeError::OutOfMemory)
        }
        _ => Ok(()),
    }
}

/// Expand 8-bit gray, gray+alpha, RGB or RGBA samples into RGBA.
fn expand_to_rgba(src: &[u8], channels: usize, out: &mut Vec<u8>) {
    out.clear();
    match channels {
        1 => src.iter().for_each(|&g| out.extend_from_slice(&[g, g, g, 255])),
        2 => src
            .chunks_exact(2)
            .for_each(|p| out.extend_from_slice(&[p[0], p[0], p[0], p[1]])),
        3 => src
            .chunks_exact(3)
            .for_each(|p| out.extend_from_slice(&[p[0], p[1], p[2], 255])),
        _ => out.extend_from_slice(src),
    }
}

fn png_error(err: png::DecodingError) -> DecodeError {
    match err {
        png::DecodingError::LimitsExceeded => DecodeError::OutOfMemory,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

fn jpeg_error(err: jpeg_decoder::Error) -> DecodeError {
    DecodeError::CorruptedFile(err.to_string())
}

/// Progressive RGBA row source over a non-interlaced PNG.
pub(crate) struct PngRows<R: BufRead + Seek> {
    reader: png::Reader<R>,
    channels: usize,
    row: Vec<u8>,
}

impl<R: BufRead + Seek> PngRows<R> {
    /// Read the PNG header. `None` if the image is interlaced.
    pub(crate) fn open(source: R) -> Result<Option<Self>, DecodeError> {
        let mut decoder = png::Decoder::new(source);
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let reader = decoder.read_info().map_err(png_error)?;
        if reader.info().interlaced {
            return Ok(None);
        }
        let channels = match reader.output_color_type().0 {
            ColorType::Grayscale => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
            ColorType::Indexed => return Ok(None),
        };
        let width = reader.info().width as usize;
        Ok(Some(Self {
            reader,
            channels,
            row: Vec::with_capacity(width * 4),
        }))
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        let info = self.reader.info();
        (info.width, info.height)
    }

    /// Bytes the decoder holds per row: the unfiltered line and its RGBA expansion.
    fn row_footprint(&self) -> u64 {
        let width = self.reader.info().width as u64;
        width * (self.channels as u64 + 4)
    }

    /// The next row as RGBA, or `None` after the last row.
    pub(crate) fn next_rgba_row(&mut self) -> Result<Option<&[u8]>, DecodeError> {
        match self.reader.next_row().map_err(png_error)? {
            Some(row) => {
                expand_to_rgba(row.data(), self.channels, &mut self.row);
                Ok(Some(&self.row))
            }
            None => Ok(None),
        }
    }
}

/// Decode a PNG at `sample_size`, feeding rows straight into the box sampler.
pub(crate) fn png_sampled<R: BufRead + Seek>(
    source: R,
    sample_size: u32,
    max_alloc: Option<u64>,
) -> Result<Option<RgbaImage>, DecodeError> {
    let Some(mut rows) = PngRows::open(source)? else {
        return Ok(None);
    };
    let (width, height) = rows.dimensions();
    check_budget(
        RowSampler::footprint(width, height, sample_size) + rows.row_footprint(),
        max_alloc,
    )?;

    let mut sampler = RowSampler::new(width, height, sample_size);
    while let Some(row) = rows.next_rgba_row()? {
        sampler.push_row(row);
    }
    sampler.finish().map(Some)
}

/// Copy `region` (already clipped to the image) out of a PNG, reading no rows past its bottom.
pub(crate) fn png_region<R: BufRead + Seek>(
    mut rows: PngRows<R>,
    region: Region,
) -> Result<RgbaImage, DecodeError> {
    let (left, right) = (region.left as usize * 4, region.right as usize * 4);
    let (top, bottom) = (region.top as u32, region.bottom as u32);
    let mut out = Vec::with_capacity(region.width() as usize * region.height() as usize * 4);

    for y in 0..bottom {
        let row = rows.next_rgba_row()?.ok_or_else(|| {
            DecodeError::CorruptedFile(format!("image data ended at row {}", y))
        })?;
        if y >= top {
            out.extend_from_slice(&row[left..right]);
        }
    }

    RgbaImage::from_raw(region.width(), region.height(), out)
        .ok_or_else(|| DecodeError::CorruptedFile("region buffer size mismatch".to_string()))
}

/// JPEG decoder with its header already read.
pub(crate) struct JpegSource<R: Read> {
    decoder: jpeg_decoder::Decoder<R>,
    width: u32,
    height: u32,
    channels: usize,
}

impl<R: Read> JpegSource<R> {
    /// Read the JPEG header. `None` for CMYK images.
    pub(crate) fn open(source: R) -> Result<Option<Self>, DecodeError> {
        let mut decoder = jpeg_decoder::Decoder::new(source);
        decoder.read_info().map_err(jpeg_error)?;
        let info = decoder
            .info()
            .ok_or_else(|| DecodeError::CorruptedFile("missing JPEG frame header".to_string()))?;
        let channels = match info.pixel_format {
            JpegPixelFormat::L8 => 1,
            JpegPixelFormat::L16 => 2,
            JpegPixelFormat::RGB24 => 3,
            JpegPixelFormat::CMYK32 => return Ok(None),
        };
        Ok(Some(Self {
            decoder,
            width: info.width as u32,
            height: info.height as u32,
            channels,
        }))
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Decode at the DCT scale closest to (and not below) `width × height`.
    ///
    /// Returns the scaled dimensions and the samples as 8-bit gray or RGB.
    fn decode_scaled(
        &mut self,
        width: u32,
        height: u32,
        max_alloc: Option<u64>,
    ) -> Result<(u32, u32, usize, Vec<u8>), DecodeError> {
        let request = |dim: u32| dim.clamp(1, u16::MAX as u32) as u16;
        let (w, h) = self
            .decoder
            .scale(request(width), request(height))
            .map_err(jpeg_error)?;
        let (w, h) = (w as u32, h as u32);
        check_budget(w as u64 * h as u64 * (self.channels as u64 + 4), max_alloc)?;

        let samples = self.decoder.decode().map_err(jpeg_error)?;
        if self.channels == 2 {
            // Big-endian 16-bit gray; keep the high byte.
            let gray = samples.chunks_exact(2).map(|p| p[0]).collect();
            return Ok((w, h, 1, gray));
        }
        Ok((w, h, self.channels, samples))
    }
}

/// Decode a JPEG at `sample_size`, letting the IDCT do the power-of-two reduction.
pub(crate) fn jpeg_sampled<R: Read>(
    source: R,
    sample_size: u32,
    max_alloc: Option<u64>,
) -> Result<Option<RgbaImage>, DecodeError> {
    let Some(mut jpeg) = JpegSource::open(source)? else {
        return Ok(None);
    };
    let (width, height) = jpeg.dimensions();
    let dst_w = sampled_dimension(width, sample_size);
    let dst_h = sampled_dimension(height, sample_size);
    check_budget(dst_w as u64 * dst_h as u64 * 4, max_alloc)?;

    let (w, h, channels, samples) = jpeg.decode_scaled(dst_w, dst_h, max_alloc)?;
    let mut rgba = Vec::with_capacity(w as usize * h as usize * 4);
    let mut row = Vec::with_capacity(w as usize * 4);
    for line in samples.chunks_exact(w as usize * channels) {
        expand_to_rgba(line, channels, &mut row);
        rgba.extend_from_slice(&row);
    }
    drop(samples);
    let img = RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| DecodeError::CorruptedFile("JPEG buffer size mismatch".to_string()))?;

    // The IDCT reduces by at most 8; finish larger divisors with the box sampler.
    let dct_factor = [8, 4, 2]
        .into_iter()
        .find(|&f| width.div_ceil(f) == w && f <= sample_size)
        .unwrap_or(1);
    let img = subsample(img, (sample_size / dct_factor).max(1));
    if img.dimensions() == (dst_w, dst_h) {
        return Ok(Some(img));
    }
    Ok(Some(image::imageops::resize(
        &img,
        dst_w,
        dst_h,
        image::imageops::FilterType::Triangle,
    )))
}

/// Copy `region` (already clipped) out of a JPEG.
///
/// The decoder has no row interface, so the full-resolution samples are held
/// once at their native channel count; only the region is expanded to RGBA.
pub(crate) fn jpeg_region<R: Read>(
    mut jpeg: JpegSource<R>,
    region: Region,
) -> Result<RgbaImage, DecodeError> {
    let (width, height) = jpeg.dimensions();
    let (w, _, channels, samples) = jpeg.decode_scaled(width, height, None)?;
    let stride = w as usize * channels;
    let (left, right) = (region.left as usize * channels, region.right as usize * channels);

    let mut out = Vec::with_capacity(region.width() as usize * region.height() as usize * 4);
    let mut row = Vec::with_capacity(region.width() as usize * 4);
    for line in samples
        .chunks_exact(stride)
        .skip(region.top as usize)
        .take(region.height() as usize)
    {
        expand_to_rgba(&line[left..right], channels, &mut row);
        out.extend_from_slice(&row);
    }

    RgbaImage::from_raw(region.width(), region.height(), out)
        .ok_or_else(|| DecodeError::CorruptedFile("region buffer size mismatch".to_string()))
}
