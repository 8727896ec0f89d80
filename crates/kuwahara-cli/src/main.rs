use std::path::PathBuf;

use argh::FromArgs;

use kuwahara::image::Image;
use kuwahara::imgproc::{
    filter::{kuwahara_with_strategy, NeighborhoodSize},
    parallel::ExecutionStrategy,
};
use kuwahara::io::functional as F;

#[derive(FromArgs, Debug)]
/// Apply an edge-preserving Kuwahara filter to a grayscale image.
struct Args {
    /// path to the input image, color images are converted to grayscale
    #[argh(positional)]
    input: PathBuf,

    /// path to the output image, the format is taken from the extension
    #[argh(positional)]
    output: PathBuf,

    /// odd neighborhood size between 3 and 15
    #[argh(positional)]
    neighborhood_size: usize,

    /// number of threads to use, 0 uses the global thread pool
    #[argh(option, short = 'n', default = "0")]
    num_threads: usize,

    /// run on the current thread only
    #[argh(switch)]
    serial: bool,
}

impl Args {
    fn strategy(&self) -> ExecutionStrategy {
        match (self.serial, self.num_threads) {
            (true, _) => ExecutionStrategy::Serial,
            (false, 0) => ExecutionStrategy::ParallelRows,
            (false, n) => ExecutionStrategy::Fixed(n),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();
    log::debug!("{:?}", args);

    // validate before touching any file
    let neighborhood = NeighborhoodSize::new(args.neighborhood_size)?;

    let src = F::read_image_any_mono8(&args.input)?;
    log::info!("read {} from {}", src.size(), args.input.display());

    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    kuwahara_with_strategy(&src, &mut dst, neighborhood, args.strategy())?;

    F::write_image_mono8(&args.output, &dst)?;
    log::info!("wrote {}", args.output.display());

    println!("Kuwahara filter applied successfully.");

    Ok(())
}
