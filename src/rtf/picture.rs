//! RTF picture extraction.
//!
//! RTF supports several image formats:
//! - Windows Metafile (WMF)
//! - Enhanced Metafile (EMF)
//! - PNG
//! - JPEG
//! - DIB (Device Independent Bitmap)
//! - Mac PICT

/// Image type in RTF documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageType {
    /// Enhanced Metafile
    Emf,
    /// Windows Metafile
    Wmf,
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// DIB (Device Independent Bitmap)
    Dib,
    /// Mac PICT format
    Pict,
    /// OS/2 metafile
    Os2Metafile,
    /// Unknown or unsupported format
    #[default]
    Unknown,
}

impl ImageType {
    /// Map a picture-type control word (`\pngblip`, `\wmetafile`, ...) to a type.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "emfblip" => Self::Emf,
            "pngblip" => Self::Png,
            "jpegblip" => Self::Jpeg,
            "macpict" => Self::Pict,
            "pmmetafile" => Self::Os2Metafile,
            "wmetafile" => Self::Wmf,
            "dibitmap" | "wbitmap" => Self::Dib,
            _ => return None,
        })
    }

    /// MIME type of the image format, if it has a common one.
    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            Self::Emf => Some("image/emf"),
            Self::Wmf => Some("image/wmf"),
            Self::Png => Some("image/png"),
            Self::Jpeg => Some("image/jpeg"),
            Self::Dib => Some("image/bmp"),
            Self::Pict => Some("image/x-pict"),
            Self::Os2Metafile | Self::Unknown => None,
        }
    }
}

/// Picture from an RTF `\pict` group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picture {
    /// Image type
    pub image_type: ImageType,
    /// Image data (hex-encoded in RTF, decoded here)
    pub data: Vec<u8>,
    /// Picture width (`\picw`)
    pub width: Option<i32>,
    /// Picture height (`\pich`)
    pub height: Option<i32>,
    /// Goal width (desired width in twips)
    pub goal_width: Option<i32>,
    /// Goal height (desired height in twips)
    pub goal_height: Option<i32>,
    /// Horizontal scaling percentage
    pub scale_x: Option<i32>,
    /// Vertical scaling percentage
    pub scale_y: Option<i32>,
    /// Crop values in twips: top, bottom, left, right
    pub crop: [i32; 4],
}

impl Picture {
    /// Get the image data as a byte slice.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Image type, falling back to signature detection when the control
    /// words did not name one.
    pub fn detected_type(&self) -> ImageType {
        match self.image_type {
            ImageType::Unknown => detect_image_type(&self.data),
            known => known,
        }
    }

    /// Get the computed width in twips, considering scaling.
    #[inline]
    pub fn computed_width(&self) -> Option<i32> {
        self.goal_width.or(self.width).map(|w| match self.scale_x {
            Some(scale) => (w * scale) / 100,
            None => w,
        })
    }

    /// Get the computed height in twips, considering scaling.
    #[inline]
    pub fn computed_height(&self) -> Option<i32> {
        self.goal_height
            .or(self.height)
            .map(|h| match self.scale_y {
                Some(scale) => (h * scale) / 100,
                None => h,
            })
    }

    /// Convert width from twips to pixels at given DPI.
    #[inline]
    pub fn width_pixels(&self, dpi: u32) -> Option<u32> {
        self.computed_width()
            .map(|tw| (tw.max(0) as u32 * dpi) / 1440)
    }

    /// Convert height from twips to pixels at given DPI.
    #[inline]
    pub fn height_pixels(&self, dpi: u32) -> Option<u32> {
        self.computed_height()
            .map(|tw| (tw.max(0) as u32 * dpi) / 1440)
    }
}

/// Detect image type from binary signature.
pub fn detect_image_type(data: &[u8]) -> ImageType {
    if data.starts_with(&[0xFF, 0xD8]) {
        return ImageType::Jpeg;
    }

    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return ImageType::Png;
    }

    // EMF: record type 1 followed by " EMF" at offset 40
    if data.len() >= 44 && data[0..4] == [0x01, 0x00, 0x00, 0x00] && data[40..44] == *b" EMF" {
        return ImageType::Emf;
    }

    // Aldus placeable metafile
    if data.starts_with(&[0xD7, 0xCD, 0xC6, 0x9A]) {
        return ImageType::Wmf;
    }

    if data.starts_with(b"BM") {
        return ImageType::Dib;
    }

    ImageType::Unknown
}

/// Streaming decoder for hex-encoded payloads split across text tokens.
#[derive(Debug, Default)]
pub(crate) struct HexDecoder {
    pending: Option<u8>,
}

impl HexDecoder {
    /// Decode the hex digits in `text` into `out`, ignoring anything else.
    pub(crate) fn feed(&mut self, text: &str, out: &mut Vec<u8>) {
        for nibble in text.bytes().filter_map(hex_value) {
            match self.pending.take() {
                Some(high) => out.push(high << 4 | nibble),
                None => self.pending = Some(nibble),
            }
        }
    }

    /// Finish decoding; a dangling nibble is dropped.
    pub(crate) fn finish(&mut self) {
        if self.pending.take().is_some() {
            log::debug!(target: "rtf.parser", "odd-length hex payload, dropping the last nibble");
        }
    }
}

#[inline]
fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let png_sig = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_image_type(&png_sig), ImageType::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        let jpeg_sig = vec![0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(detect_image_type(&jpeg_sig), ImageType::Jpeg);
        assert_eq!(detect_image_type(&[]), ImageType::Unknown);
    }

    #[test]
    fn test_picture_dimensions() {
        let pic = Picture {
            image_type: ImageType::Png,
            width: Some(1440),
            height: Some(1440),
            scale_x: Some(200),
            scale_y: Some(200),
            ..Default::default()
        };

        assert_eq!(pic.computed_width(), Some(2880));
        assert_eq!(pic.width_pixels(96), Some(192));
        assert_eq!(pic.height_pixels(96), Some(192));
    }

    #[test]
    fn test_hex_decoder_across_chunks() {
        let mut decoder = HexDecoder::default();
        let mut out = Vec::new();
        decoder.feed("89 5", &mut out);
        decoder.feed("0\n4e4", &mut out);
        decoder.finish();
        assert_eq!(out, vec![0x89, 0x50, 0x4E]);
    }

    #[test]
    fn test_detected_type_falls_back_to_signature() {
        let pic = Picture {
            data: vec![0xFF, 0xD8, 0x00],
            ..Default::default()
        };
        assert_eq!(pic.detected_type(), ImageType::Jpeg);
    }
}
