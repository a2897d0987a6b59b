//! Decoding inline images into PDF image XObjects.

use image::GenericImageView;
use lopdf::{Object, Stream, dictionary};
use petty_traits::RenderError;

/// A decoded image ready to be added to a document.
#[derive(Debug)]
pub(crate) struct ImageXObject {
    pub image: Stream,
    /// Alpha channel, present only when the source had one.
    pub soft_mask: Option<Stream>,
}

pub(crate) fn decode(name: &str, data: &[u8]) -> Result<ImageXObject, RenderError> {
    let decoded = image::load_from_memory(data).map_err(|e| RenderError::Image {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    let (width, height) = decoded.dimensions();
    log::debug!("Decoded image '{}' ({}x{})", name, width, height);

    let soft_mask = if decoded.color().has_alpha() {
        let alpha: Vec<u8> = decoded.to_rgba8().pixels().map(|p| p.0[3]).collect();
        Some(image_stream(name, width, height, "DeviceGray", alpha)?)
    } else {
        None
    };
    let image = image_stream(name, width, height, "DeviceRGB", decoded.to_rgb8().into_raw())?;

    Ok(ImageXObject { image, soft_mask })
}

fn image_stream(
    name: &str,
    width: u32,
    height: u32,
    color_space: &str,
    samples: Vec<u8>,
) -> Result<Stream, RenderError> {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => Object::Name(color_space.as_bytes().to_vec()),
        "BitsPerComponent" => 8,
    };
    let mut stream = Stream::new(dict, samples);
    stream.compress().map_err(|e| RenderError::Image {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    Ok(stream)
}
