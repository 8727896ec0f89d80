use std::path::Path;

use kuwahara_image::{Image, ImageSize};

use crate::{error::IoError, png};

/// Reads an image from the given file path as 8-bit grayscale.
///
/// The method decodes any image format supported by the image crate. Color
/// images are converted to luma, so the result always has one channel.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
pub fn read_image_any_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    if img.color() != image::ColorType::L8 {
        log::debug!(
            "converting {:?} image {} to grayscale",
            img.color(),
            file_path.display()
        );
    }

    let gray = img.into_luma8();
    let size = ImageSize {
        width: gray.width() as usize,
        height: gray.height() as usize,
    };

    Ok(Image::new(size, gray.into_raw())?)
}

/// Writes a grayscale image to the given file path.
///
/// The format is chosen from the file extension: `png` files are written with
/// [`png::write_image_png_mono8`], anything else is encoded by the image crate.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `image` - The grayscale image to write.
pub fn write_image_mono8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let Some(extension) = file_path.extension() else {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    };

    if extension.eq_ignore_ascii_case("png") {
        return png::write_image_png_mono8(file_path, image);
    }

    // reject unknown extensions before touching the file system
    if image::ImageFormat::from_path(file_path).is_err() {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    image::save_buffer(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::L8,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: ImageSize) -> Result<Image<u8, 1>, IoError> {
        let data = (0..size.num_pixels())
            .map(|i| {
                let (y, x) = (i / size.width, i % size.width);
                if (y / 4 + x / 4) % 2 == 0 {
                    32
                } else {
                    224
                }
            })
            .collect();
        Ok(Image::new(size, data)?)
    }

    #[test]
    fn read_write_any_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("board.png");

        let image = checkerboard([24, 16].into())?;
        write_image_mono8(&file_path, &image)?;

        let image_back = read_image_any_mono8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_write_any_bmp() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("board.bmp");

        let image = checkerboard([20, 12].into())?;
        write_image_mono8(&file_path, &image)?;

        let image_back = read_image_any_mono8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_any_converts_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray-rgb.png");

        // equal channels keep their value once converted to luma
        let rgb = image::RgbImage::from_pixel(5, 3, image::Rgb([90, 90, 90]));
        rgb.save(&file_path)?;

        let image = read_image_any_mono8(&file_path)?;
        assert_eq!(image.size().width, 5);
        assert_eq!(image.size().height, 3);
        assert_eq!(image.num_channels(), 1);
        assert!(image.as_slice().iter().all(|&v| v == 90));

        Ok(())
    }

    #[test]
    fn read_any_missing_file() {
        let res = read_image_any_mono8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_any_not_an_image() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("notes.txt");
        std::fs::write(&file_path, b"plain text")?;

        let res = read_image_any_mono8(&file_path);
        assert!(matches!(res, Err(IoError::ImageDecodeError(_))));

        Ok(())
    }

    #[test]
    fn write_invalid_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = checkerboard([4, 4].into())?;

        let res = write_image_mono8(tmp_dir.path().join("no_extension"), &image);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));

        let res = write_image_mono8(tmp_dir.path().join("image.unknown"), &image);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));

        Ok(())
    }
}
