use std::{fs, path::Path};

use anyhow::{Context, Result};
use thiserror::Error;

/// Branding image for the report heading. Only baseline or progressive
/// JPEG is embedded; the bytes go into the PDF unchanged.
#[derive(Debug, Clone)]
pub struct BrandingImage {
    bytes: Vec<u8>,
}

/// Frame dimensions read from a JPEG header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegInfo {
    pub width: u16,
    pub height: u16,
    pub components: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("not a JPEG file")]
    NotJpeg,

    #[error("JPEG data ends before the frame header")]
    Truncated,

    #[error("JPEG has no frame header")]
    NoFrameHeader,

    #[error("JPEG has zero width or height")]
    EmptyFrame,

    #[error("unsupported JPEG component count: {0}")]
    UnsupportedComponents(u8),
}

impl BrandingImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read branding image: {}", path.display()))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read the frame header without decoding any image data.
    pub fn probe(&self) -> Result<JpegInfo, ImageError> {
        probe_jpeg(&self.bytes)
    }
}

fn probe_jpeg(bytes: &[u8]) -> Result<JpegInfo, ImageError> {
    if bytes.get(..2) != Some(&[0xFF, 0xD8][..]) {
        return Err(ImageError::NotJpeg);
    }

    let mut i = 2;
    loop {
        if *bytes.get(i).ok_or(ImageError::Truncated)? != 0xFF {
            return Err(ImageError::NotJpeg);
        }
        // Markers may be padded with any number of 0xFF fill bytes.
        while bytes.get(i) == Some(&0xFF) {
            i += 1;
        }
        let marker = *bytes.get(i).ok_or(ImageError::Truncated)?;
        i += 1;

        match marker {
            0x01 | 0xD0..=0xD7 => continue,
            0xD9 | 0xDA => return Err(ImageError::NoFrameHeader),
            _ => {}
        }

        let len = read_u16(bytes, i)? as usize;
        if len < 2 {
            return Err(ImageError::NotJpeg);
        }

        // SOF0..SOF15, minus DHT (C4), JPG (C8) and DAC (CC).
        if matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            let height = read_u16(bytes, i + 3)?;
            let width = read_u16(bytes, i + 5)?;
            let components = *bytes.get(i + 7).ok_or(ImageError::Truncated)?;

            if width == 0 || height == 0 {
                return Err(ImageError::EmptyFrame);
            }
            if !matches!(components, 1 | 3 | 4) {
                return Err(ImageError::UnsupportedComponents(components));
            }
            return Ok(JpegInfo {
                width,
                height,
                components,
            });
        }

        i += len;
    }
}

fn read_u16(bytes: &[u8], at: usize) -> Result<u16, ImageError> {
    match bytes.get(at..at + 2) {
        Some(b) => Ok(u16::from_be_bytes([b[0], b[1]])),
        None => Err(ImageError::Truncated),
    }
}
