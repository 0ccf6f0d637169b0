use clap::{Parser, ValueEnum};
use hairgen::{
    logger::{self, LogLevel, LoggerConfig},
    models::LENGTH_PRESETS,
    prompts, EncodedImage, GenerationInput, History, Mode, PreferencePolicy, StyleOptions,
    StylistClient, StylistConfig,
};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Copy the hairstyle from a reference photo
    #[value(alias = "ref")]
    Reference,
    /// Apply a hairstyle described in words
    #[value(alias = "describe")]
    Text,
    /// Let the model pick a flattering new style
    Lucky,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Reference => Mode::Reference,
            ModeArg::Text => Mode::Text,
            ModeArg::Lucky => Mode::Lucky,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hairgen", version, about = "Try a new hairstyle on a selfie with Gemini")]
struct Args {
    #[arg(value_enum)]
    mode: ModeArg,
    /// Photo of the person to restyle
    selfie: PathBuf,
    /// Reference photo (reference mode) or style description (text mode)
    extra: Option<String>,
    /// Hair length, e.g. Short, Medium, Long, Buzz Cut or Bald
    #[arg(long)]
    length: Option<String>,
    /// Hair color, e.g. blonde
    #[arg(long)]
    color: Option<String>,
    /// Directory the result is written to
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

impl Args {
    fn style_options(&self) -> StyleOptions {
        let mut options = StyleOptions::new();
        if let Some(length) = &self.length {
            options = options.with_length(length.as_str());
        }
        if let Some(color) = &self.color {
            options = options.with_color(color.as_str());
        }
        options
    }
}

async fn load_image(path: &Path) -> Result<EncodedImage, Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(path).await?;
    Ok(EncodedImage::from_file_bytes(&bytes, path))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mode = Mode::from(args.mode);

    let dotenv_loaded = dotenv::dotenv().is_ok();

    let level = env::var("HAIRGEN_LOG")
        .ok()
        .and_then(|l| LogLevel::parse(&l))
        .unwrap_or(LogLevel::Info);
    logger::init_with_config(LoggerConfig::development().with_level(level))?;

    if !dotenv_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    if let Some(length) = &args.length {
        if !LENGTH_PRESETS.iter().any(|p| p.eq_ignore_ascii_case(length.trim())) {
            log::debug!("Length \"{}\" is not one of the presets, passing it through", length);
        }
    }

    let config = StylistConfig::from_env().with_preferences(PreferencePolicy::all());
    logger::log_startup_info("hairgen", env!("CARGO_PKG_VERSION"), &config);

    // The credential is read here and handed to every call explicitly.
    let credential = env::var("GEMINI_API_KEY").unwrap_or_default();

    let mut input =
        GenerationInput::new(load_image(&args.selfie).await?).with_options(args.style_options());
    match mode {
        Mode::Reference => {
            if let Some(path) = &args.extra {
                input = input.with_style_image(load_image(Path::new(path)).await?);
            }
        }
        Mode::Text => {
            let description = args.extra.clone().unwrap_or_else(|| {
                let suggestion = prompts::suggest();
                log::info!("No description given, trying \"{}\"", suggestion);
                suggestion.to_string()
            });
            input = input.with_description(description);
        }
        Mode::Lucky => {}
    }

    let client = StylistClient::new(config.clone())?;
    let mut history = match config.history_limit {
        Some(limit) => History::with_limit(limit),
        None => History::new(),
    };

    match client
        .generate_and_record(mode, &input, &credential, &mut history)
        .await
    {
        Ok(entry) => {
            let path = args.out.join(entry.file_name());
            let bytes = entry.image.decode()?;
            tokio::fs::write(&path, bytes).await?;
            log::info!("💾 Saved result to {}", path.display());
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            log::error!("{}", e.user_message());
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
