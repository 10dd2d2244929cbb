use clap::Parser;
use std::path::PathBuf;

mod cli;

const BUNDLE_DIR: &str = "SmartMurti";
const LAUNCHER: &str = "murti-launcher";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Launch { database_url } => {
            trunk_build(false).await?;

            let mut cmd = tokio::process::Command::new("cargo");
            cmd.arg("run")
                .arg("--package")
                .arg(LAUNCHER)
                .arg("--")
                .arg("--dist-dir")
                .arg("frontend/dist");
            if let Some(url) = database_url {
                cmd.arg("--database-url").arg(url);
            }
            cmd.spawn()?.wait().await?;

            Ok(())
        }
        cli::Command::Dist { target_triple } => {
            let mut cmd = tokio::process::Command::new("cargo");
            cmd.arg("build")
                .arg("--package")
                .arg(LAUNCHER)
                .arg("--release");
            if let Some(target_triple) = &target_triple {
                cmd.arg("--target").arg(target_triple);
            }
            cmd.spawn()?.wait().await?;

            trunk_build(true).await?;

            let dist = PathBuf::from(BUNDLE_DIR).join("dist");
            tokio::fs::create_dir_all(&dist).await?;

            let mut release = PathBuf::from("target");
            if let Some(target_triple) = &target_triple {
                release.push(target_triple);
            }
            release.push("release");
            release.push(LAUNCHER);
            tokio::fs::copy(&release, PathBuf::from(BUNDLE_DIR).join(LAUNCHER)).await?;

            let mut entries = tokio::fs::read_dir("frontend/dist").await?;
            while let Some(file) = entries.next_entry().await? {
                tokio::fs::copy(file.path(), dist.join(file.file_name())).await?;
            }

            Ok(())
        }
    }
}

async fn trunk_build(release: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new("trunk");
    cmd.current_dir(std::fs::canonicalize("frontend")?);
    cmd.arg("build");
    if release {
        cmd.arg("--release");
    }
    cmd.spawn()?.wait().await?;
    Ok(())
}
