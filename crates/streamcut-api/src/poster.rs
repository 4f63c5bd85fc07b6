// crates/streamcut-api/src/poster.rs
//
// Poster probing: fetch the asset's poster PNG and read its dimensions.
// The player is sized from the poster rather than the video stream — some
// renditions misreport display aspect until several segments in, while the
// poster is correct from the first byte.

use crate::error::ApiError;

/// Fetch the poster at `url`. Returns the raw PNG bytes plus decoded
/// (width, height). The bytes are kept so the UI can reuse them as the
/// library thumbnail without a second fetch.
pub fn fetch_poster(agent: &ureq::Agent, url: &str) -> Result<(Vec<u8>, u32, u32), ApiError> {
    let mut resp = agent.get(url).call()?;
    let bytes = resp.body_mut().read_to_vec().map_err(ApiError::from)?;
    let (w, h) = poster_size(&bytes)?;
    Ok((bytes, w, h))
}

/// Decode only the PNG header — enough for dimensions, no pixel work.
pub fn poster_size(bytes: &[u8]) -> Result<(u32, u32), ApiError> {
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info()?;
    let info = reader.info();
    Ok((info.width, info.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal in-memory PNG of the given size, grayscale.
    fn make_png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&vec![0u8; (width * height) as usize])
                .unwrap();
        }
        out
    }

    #[test]
    fn size_comes_from_the_header() {
        let bytes = make_png(320, 180);
        assert_eq!(poster_size(&bytes).unwrap(), (320, 180));
    }

    #[test]
    fn portrait_poster() {
        let bytes = make_png(9, 16);
        assert_eq!(poster_size(&bytes).unwrap(), (9, 16));
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(poster_size(b"not a png").is_err());
    }
}
