use {
    smoke_base::{LogConfig, init_logger},
    smoke_dataset::{Dataset, DatasetConfig, FlowBackend, Mode, SmokeVideoDataset},
    smoke_image::{denormalize, encode_png},
    std::path::PathBuf,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger(&LogConfig::from_env())?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <dataset.json> [--flow] [--backend <name>] [--index N] [--png <dir>]",
            args[0]
        );
        std::process::exit(1);
    }

    let mut config = DatasetConfig::from_json_file(&args[1])?;
    let mut index = None;
    let mut png_dir = None;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--flow" => config = config.with_mode(Mode::Flow),
            "--backend" => {
                let value = rest.next().ok_or("--backend needs a name")?;
                config = config.with_flow_backend(value.parse::<FlowBackend>()?);
            }
            "--index" => {
                let value = rest.next().ok_or("--index needs a value")?;
                index = Some(value.parse::<usize>()?);
            }
            "--png" => {
                let value = rest.next().ok_or("--png needs a directory")?;
                png_dir = Some(PathBuf::from(value));
            }
            other => return Err(format!("unknown argument {other:?}").into()),
        }
    }

    let dataset = SmokeVideoDataset::new(&config)?;
    if let Some(dir) = &png_dir {
        std::fs::create_dir_all(dir)?;
    }

    let indices = match index {
        Some(i) => i..i + 1,
        None => 0..dataset.len(),
    };

    let mut failed = 0;
    for i in indices {
        let sample = match dataset.get(i) {
            Ok(sample) => sample,
            Err(e) => {
                log::error!("sample {}: {}", i, e);
                failed += 1;
                continue;
            }
        };
        println!(
            "{:>5} {:<40} {:?} frames {:?} labels {:?}",
            i, sample.file_name, sample.label, sample.frames.shape, sample.labels.shape
        );

        if let Some(dir) = &png_dir {
            // preview the first frame of each sample
            if let Some(frame) = sample.frame(0) {
                let name = sample.file_name.replace('/', "_");
                let path = dir.join(format!("{}-{}.png", name, config.mode()));
                std::fs::write(&path, encode_png(&denormalize(&frame))?)?;
                log::info!("wrote {}", path.display());
            }
        }
    }

    if failed > 0 {
        log::warn!("{} samples failed to load", failed);
    }
    Ok(())
}
