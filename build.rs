//! Build script that reports the system OpenCV installation and the bundled
//! detector asset, with installation hints when either is missing.

use std::path::Path;
use std::process::Command;

const CASCADE_ASSET: &str = "assets/haarcascade_frontalface_default.xml";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={CASCADE_ASSET}");

    report_opencv();
    report_cascade_asset();
}

fn pkg_config_version(package: &str) -> Option<String> {
    let output = Command::new("pkg-config").args(["--modversion", package]).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn report_opencv() {
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    match pkg_config_version("opencv4").or_else(|| pkg_config_version("opencv")) {
        Some(version) => println!("cargo:warning=Found OpenCV version: {version}"),
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config. The objdetect, imgproc, videoio and highgui modules are required.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev pkg-config");
            println!("cargo:warning=On macOS: brew install opencv pkg-config");
        }
    }
}

fn report_cascade_asset() {
    if !Path::new(CASCADE_ASSET).exists() {
        println!("cargo:warning=Face cascade not found at {CASCADE_ASSET}.");
        println!("cargo:warning=Copy haarcascade_frontalface_default.xml from your OpenCV data directory or pass --cascade at runtime.");
    }
}
