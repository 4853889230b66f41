//! Uncompressed 24-bit BMP reading and writing.
//!
//! Layout: 14-byte file header, 40-byte BITMAPINFOHEADER, then pixel rows
//! stored bottom-to-top as B,G,R bytes with each row padded to 4 bytes.

use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use lux_math::Color;
use thiserror::Error;

use crate::texture::{color_to_rgb8, Texture};

/// "BM"
pub const SIGNATURE: u16 = 0x4D42;
const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the pixel array in files we write.
pub const HEADER_SIZE: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
const BITS_PER_PIXEL: u16 = 24;
const COMPRESSION_NONE: u32 = 0;
/// 72 DPI
const PIXELS_PER_METER: i32 = 2835;

/// Errors that can occur while reading or writing BMP files.
#[derive(Error, Debug)]
pub enum BmpError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("not a BMP file (signature {0:#06x})")]
    BadSignature(u16),

    #[error("unsupported bit depth {0}, only 24-bit is supported")]
    UnsupportedBitDepth(u16),

    #[error("unsupported compression {0}, only uncompressed files are supported")]
    UnsupportedCompression(u32),

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("file ends before the pixel data does")]
    Truncated,
}

impl BmpError {
    /// True for errors about the file contents, as opposed to I/O failures.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, BmpError::Io(_))
    }
}

pub type BmpResult<T> = Result<T, BmpError>;

/// Bytes per stored row, padded to a multiple of 4.
#[inline]
fn row_stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

/// Encode a texture as a complete BMP file in memory.
pub fn encode(texture: &Texture) -> BmpResult<Vec<u8>> {
    let width = texture.width() as usize;
    let height = texture.height() as usize;
    let stride = row_stride(width);

    let too_big = || BmpError::InvalidDimensions {
        width: width as i64,
        height: height as i64,
    };
    let data_size = u32::try_from(stride * height).map_err(|_| too_big())?;
    let file_size = data_size.checked_add(HEADER_SIZE).ok_or_else(too_big)?;
    let width_field = i32::try_from(width).map_err(|_| too_big())?;
    let height_field = i32::try_from(height).map_err(|_| too_big())?;

    let mut out = Vec::with_capacity(file_size as usize);

    // File header
    out.write_u16::<LittleEndian>(SIGNATURE)?;
    out.write_u32::<LittleEndian>(file_size)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(HEADER_SIZE)?;

    // Info header
    out.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    out.write_i32::<LittleEndian>(width_field)?;
    out.write_i32::<LittleEndian>(height_field)?;
    out.write_u16::<LittleEndian>(1)?;
    out.write_u16::<LittleEndian>(BITS_PER_PIXEL)?;
    out.write_u32::<LittleEndian>(COMPRESSION_NONE)?;
    out.write_u32::<LittleEndian>(data_size)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;

    let mut row = vec![0u8; stride];
    for y in (0..texture.height()).rev() {
        for (x, color) in texture.row(y).iter().enumerate() {
            let [r, g, b] = color_to_rgb8(*color);
            row[x * 3..x * 3 + 3].copy_from_slice(&[b, g, r]);
        }
        out.extend_from_slice(&row);
    }

    Ok(out)
}

/// Write a texture as BMP to any writer.
pub fn write_to<W: Write>(texture: &Texture, mut writer: W) -> BmpResult<()> {
    let bytes = encode(texture)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Save a texture as a BMP file.
///
/// The file is encoded in memory and written to a sibling temporary file,
/// which then replaces `path`. On any failure an existing file at `path` is
/// left as it was.
pub fn save(texture: &Texture, path: impl AsRef<Path>) -> BmpResult<()> {
    let path = path.as_ref();
    let bytes = encode(texture)?;

    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    let result = fs::write(&partial, &bytes).and_then(|()| fs::rename(&partial, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }

    log::debug!(
        "Wrote {}x{} BMP to {} ({} bytes)",
        texture.width(),
        texture.height(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

fn truncated_on_eof(e: io::Error) -> BmpError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        BmpError::Truncated
    } else {
        BmpError::Io(e)
    }
}

/// Decode a BMP from any reader.
pub fn decode<R: Read>(mut reader: R) -> BmpResult<Texture> {
    let mut header = [0u8; HEADER_SIZE as usize];
    reader.read_exact(&mut header).map_err(truncated_on_eof)?;
    let mut h = Cursor::new(&header[..]);

    let signature = h.read_u16::<LittleEndian>()?;
    if signature != SIGNATURE {
        return Err(BmpError::BadSignature(signature));
    }
    let _file_size = h.read_u32::<LittleEndian>()?;
    let _reserved = h.read_u32::<LittleEndian>()?;
    let pixel_offset = h.read_u32::<LittleEndian>()?;

    let _info_size = h.read_u32::<LittleEndian>()?;
    let width = h.read_i32::<LittleEndian>()?;
    let height = h.read_i32::<LittleEndian>()?;
    let _planes = h.read_u16::<LittleEndian>()?;
    let bit_count = h.read_u16::<LittleEndian>()?;
    let compression = h.read_u32::<LittleEndian>()?;

    if bit_count != BITS_PER_PIXEL {
        return Err(BmpError::UnsupportedBitDepth(bit_count));
    }
    if compression != COMPRESSION_NONE {
        return Err(BmpError::UnsupportedCompression(compression));
    }
    if width <= 0 || height <= 0 || pixel_offset < HEADER_SIZE {
        return Err(BmpError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }

    // Skip anything between the headers and the pixel array
    let gap = u64::from(pixel_offset - HEADER_SIZE);
    let skipped = io::copy(&mut reader.by_ref().take(gap), &mut io::sink())?;
    if skipped != gap {
        return Err(BmpError::Truncated);
    }

    let (width, height) = (width as u32, height as u32);
    let stride = row_stride(width as usize);
    let pixel_count = (width as usize).checked_mul(height as usize);
    if pixel_count.is_none() || stride.checked_mul(height as usize).is_none() {
        return Err(BmpError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }

    // Buffers grow only as pixel data actually arrives, so a header that
    // claims a huge image fails as truncated instead of allocating up front.
    let mut row = Vec::new();
    let mut bottom_up = Vec::new();
    for _ in 0..height {
        row.clear();
        reader.by_ref().take(stride as u64).read_to_end(&mut row)?;
        if row.len() != stride {
            return Err(BmpError::Truncated);
        }
        bottom_up.extend(row.chunks_exact(3).take(width as usize).map(|bgr| {
            Color::new(bgr[2] as f32, bgr[1] as f32, bgr[0] as f32) / 255.0
        }));
    }

    // Stored rows run bottom to top
    let pixels = bottom_up
        .chunks_exact(width as usize)
        .rev()
        .flatten()
        .copied()
        .collect();
    Texture::from_pixels(width, height, pixels).ok_or(BmpError::Truncated)
}

/// Load a BMP file into a texture.
pub fn load(path: impl AsRef<Path>) -> BmpResult<Texture> {
    let file = fs::File::open(path.as_ref())?;
    decode(io::BufReader::new(file))
}
