//! Face parallax: drive a 3D scene camera from webcam head tracking.

use anyhow::Result;
use clap::Parser;
use face_parallax::{
    app::{AppConfig, TrackingApp, VideoSource},
    config::Config,
};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long, conflicts_with = "video")]
    cam: Option<i32>,

    /// Video file to process instead of a camera
    #[arg(short, long)]
    video: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Scene document to load (path or file:// URL)
    #[arg(short, long)]
    scene: Option<String>,

    /// Id of the scene camera to drive
    #[arg(long)]
    camera_id: Option<String>,

    /// Track the first camera in the scene if the id is missing
    #[arg(long)]
    camera_fallback: bool,

    /// Cascade classifier XML file
    #[arg(long)]
    cascade: Option<String>,

    /// Mirror the camera image horizontally
    #[arg(short, long)]
    mirror: bool,

    /// GUI display mode (all, none)
    #[arg(short, long, default_value = "all")]
    gui: String,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{}", face_parallax::config::EXAMPLE_CONFIG);
        return Ok(());
    }

    info!("Face Parallax");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(scene) = args.scene {
        config.tracking.scene_url = scene;
    }
    if let Some(camera_id) = args.camera_id {
        config.scene.camera_id = camera_id;
    }
    if args.camera_fallback {
        config.scene.camera_fallback = true;
    }
    if let Some(cascade) = args.cascade {
        config.detector.cascade = cascade.into();
    }
    if let Some(cam) = args.cam {
        config.capture.camera_index = cam;
    }
    if args.mirror {
        config.display.mirror = true;
    }

    let app_config = AppConfig {
        video_source: if let Some(video_path) = args.video {
            VideoSource::File(video_path)
        } else {
            VideoSource::Camera(config.capture.camera_index)
        },
        headless: args.gui == "none",
        config,
    };

    let mut app = match TrackingApp::new(app_config) {
        Ok(app) => app,
        Err(e) => {
            error!("Initialization failed: {}", e);
            return Err(e.into());
        }
    };
    app.run()?;

    Ok(())
}
