use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use vl2d::mesh::{write_obj, MeshExport, MeshSlot};
use vl2d::{LightSetting, SceneFile, VolumetricLight};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Obj,
}

/// 由光源設定與場景檔產生光錐網格
#[derive(Debug, Parser)]
#[command(name = "vl2d", version)]
struct Args {
    /// 光源設定檔（.toml / .yaml / .json）
    #[arg(long, default_value = "light.toml")]
    config: PathBuf,
    /// 場景檔（.json / .yaml）
    #[arg(long)]
    scene: PathBuf,
    /// 輸出檔，省略時寫到 stdout
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// log4rs 設定檔
    #[arg(long, default_value = "log4rs.yml")]
    log_config: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    if path.exists() {
        log4rs::init_file(path, Default::default())
            .with_context(|| format!("無法載入 log 設定 {}", path.display()))?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))
        .context("無法建立預設 log 設定")?;
    log4rs::init_config(config).context("無法初始化 log")?;
    warn!("{} not found, logging to stderr", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_config)?;

    let setting = LightSetting::load_from_file(&args.config)
        .with_context(|| format!("讀取光源設定失敗: {}", args.config.display()))?;
    let scene = SceneFile::load_from_file(&args.scene)
        .with_context(|| format!("讀取場景失敗: {}", args.scene.display()))?;
    let world = scene.build_world().context("建立場景失敗")?;

    let name = if scene.light.name.is_empty() {
        "VolumetricLight2D".to_string()
    } else {
        scene.light.name.clone()
    };
    let mut light = VolumetricLight::new(name, setting, scene.light_pose());
    light.set_self_collider(scene.self_collider());

    let mut slot = MeshSlot::new();
    light.update_mesh(&world, &mut slot).context("重建光錐網格失敗")?;
    let mesh = slot.take().context("沒有產生網格")?;
    info!(
        "light {} built: {} vertices, {} triangles",
        light.name,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("無法建立 {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Json => {
            let export = MeshExport::new(&light.name, light.render_settings(), &mesh);
            let json = export.to_json_pretty()?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Obj => write_obj(&mesh, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
