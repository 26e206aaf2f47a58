mod config;
mod draw;

use config::{Config, ModelKind};
use draw::draw_pose;
use log::{error, info};
use pose_base::Vec2;
use pose_infer::{
    GeometryMapper, HeatmapPoseEstimator, InputSpec, ModelSource, OnnxBackend, OpenPoseEstimator,
    PoseEstimationInput, PoseEstimator,
};

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let frame = pose_image::load_frame(&config.image_path)?;
    info!(
        "loaded {} ({}x{})",
        config.image_path.display(),
        frame.shape[1],
        frame.shape[0]
    );

    let backend = OnnxBackend::new(config.device.clone());
    let model = ModelSource::File(config.model_path.clone());
    let (mut estimator, spec): (Box<dyn PoseEstimator>, InputSpec) = match config.model_kind {
        ModelKind::Cpm => {
            let estimator = HeatmapPoseEstimator::new(model, &backend)?;
            let spec = *estimator.input_spec();
            (Box::new(estimator), spec)
        }
        ModelKind::OpenPose => {
            let estimator = OpenPoseEstimator::new(model, &backend)?;
            let spec = *estimator.input_spec();
            (Box::new(estimator), spec)
        }
    };
    info!(
        "model {} loaded on {}",
        config.model_path.display(),
        config.device
    );

    let input = PoseEstimationInput::new(frame).with_postprocess(config.options);
    let output = estimator.inference(&input)?;

    info!("{} human(s)", output.len());
    for (index, human) in output.humans.iter().enumerate() {
        info!(
            "human {index}: {} keypoints, {} lines, score {:.3}",
            human.present_count(),
            human.lines.len(),
            human.total_score()
        );
        for (part, keypoint) in human.parts() {
            info!(
                "  {part:?} at ({:.3}, {:.3}) score {:.3}",
                keypoint.position.x, keypoint.position.y, keypoint.score
            );
        }
    }

    if let Some(path) = &config.output_path {
        let mut overlay = input.frame.clone();
        let (height, width) = (overlay.shape[0], overlay.shape[1]);
        let geometry = GeometryMapper::new(
            Vec2::new(width, height),
            &input.preprocess.crop_area,
            Vec2::new(spec.width, spec.height),
        )?;
        draw_pose(&mut overlay.data, width, height, &output, &geometry);
        pose_image::save_frame(path, &overlay)?;
        info!("overlay written to {}", path.display());
    }

    Ok(())
}

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("still-pose: {err}");
            std::process::exit(2);
        }
    };

    match &config.log_dir {
        Some(dir) => {
            if let Err(err) = pose_base::init_file_logger(dir) {
                eprintln!("still-pose: cannot open log directory {}: {err}", dir.display());
                std::process::exit(2);
            }
        }
        None => pose_base::init_stdout_logger(),
    }

    if let Err(err) = run(&config) {
        error!("{err}");
        std::process::exit(1);
    }
}
