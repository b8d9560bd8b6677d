use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use libtibetan::{
    create_ime_engine, load_prediction_index, vk, Engine, ImeContext, KeyEvent, KeyLayer,
    KeyTranslator, TibetanConfig, WordLists,
};

#[derive(Parser)]
#[command(name = "libtibetan")]
#[command(about = "Tibetan keyboard input method with dictionary prediction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the word lists
    #[arg(long, global = true, default_value = "data")]
    dict_dir: PathBuf,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compiled word list snapshot, used instead of the text files
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed stdin lines to the engine as US keyboard key presses
    Type {
        /// Press Return at the end of every line
        #[arg(long)]
        enter: bool,
        /// Print a JSON snapshot after every line
        #[arg(long)]
        json: bool,
    },
    /// Translate Latin keys through the keymap and list predictions
    Predict {
        keys: String,
    },
    /// Print a keymap layer
    Keymap {
        #[arg(long, value_enum)]
        layer: Option<LayerArg>,
    },
    /// Compile the text word lists into a bincode snapshot
    Compile {
        output: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum LayerArg {
    Base,
    Shift,
    Stack,
    AltCtrlShift,
    StackShift,
}

impl From<LayerArg> for KeyLayer {
    fn from(arg: LayerArg) -> Self {
        match arg {
            LayerArg::Base => KeyLayer::Base,
            LayerArg::Shift => KeyLayer::Shift,
            LayerArg::Stack => KeyLayer::Stack,
            LayerArg::AltCtrlShift => KeyLayer::AltCtrlShift,
            LayerArg::StackShift => KeyLayer::StackShift,
        }
    }
}

#[derive(Serialize)]
struct LineReport<'a> {
    input: &'a str,
    committed: &'a str,
    context: &'a ImeContext,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("libtibetan=info,libtibetan_core=info")),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TibetanConfig::load_toml(path)?,
        None => TibetanConfig::default(),
    };

    match cli.command.unwrap_or(Commands::Type {
        enter: false,
        json: false,
    }) {
        Commands::Type { enter, json } => run_type(&cli.dict_dir, cli.snapshot, config, enter, json),
        Commands::Predict { keys } => run_predict(&cli.dict_dir, cli.snapshot, &config, &keys),
        Commands::Keymap { layer } => {
            run_keymap(layer.map(KeyLayer::from));
            Ok(())
        }
        Commands::Compile { output } => {
            let lists = WordLists::load_dir(&cli.dict_dir, &config.base.dictionary)?;
            lists.save_bincode(&output)?;
            info!(words = lists.len(), path = %output.display(), "wrote snapshot");
            Ok(())
        }
    }
}

fn run_type(
    dict_dir: &std::path::Path,
    snapshot: Option<PathBuf>,
    config: TibetanConfig,
    enter: bool,
    json: bool,
) -> Result<()> {
    let mut engine = create_ime_engine(dict_dir, snapshot.as_deref(), config)?;
    engine.on_activate();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let mut committed = String::new();

        let mut events: Vec<KeyEvent> = Vec::new();
        for ch in line.chars() {
            match KeyEvent::from_ascii(ch) {
                Some(event) => events.push(event),
                None => warn!(%ch, "no US keyboard key types this character"),
            }
        }
        if enter {
            events.push(KeyEvent::special(vk::RETURN));
        }

        for event in &events {
            engine.process_key(event);
            committed.push_str(&engine.context_mut().take_commit());
        }

        let ctx = engine.context();
        if json {
            let report = LineReport {
                input: &line,
                committed: &committed,
                context: ctx,
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("preedit:   {}", ctx.preedit_text);
            if ctx.candidates_visible {
                for (i, cand) in ctx.candidates.iter().enumerate() {
                    let marker = if i == ctx.candidate_cursor { '>' } else { ' ' };
                    println!("{} {}. {}", marker, (i + 1) % 10, cand);
                }
                if !ctx.auxiliary_text.is_empty() {
                    println!("  page {}", ctx.auxiliary_text);
                }
            }
            println!("committed: {}", committed);
            println!();
        }
    }

    engine.on_deactivate();
    Ok(())
}

fn run_predict(
    dict_dir: &std::path::Path,
    snapshot: Option<PathBuf>,
    config: &TibetanConfig,
    keys: &str,
) -> Result<()> {
    let translator = KeyTranslator::new();
    let mut prefix = String::new();
    for key in keys.chars() {
        let layer = if key.is_ascii_uppercase() {
            KeyLayer::Shift
        } else {
            KeyLayer::Base
        };
        match translator.get_key(key, layer) {
            Some(ch) => prefix.push(ch),
            None => bail!("key '{}' has no {} mapping", key, layer),
        }
    }

    let index = load_prediction_index(dict_dir, snapshot.as_deref(), config)?;
    let mut predictor = Engine::new(index, 0);
    let candidates = predictor.predict(&prefix);

    println!("prefix: {}", prefix);
    if candidates.is_empty() {
        println!("  (no candidates found)");
    }
    for (i, cand) in candidates.iter().enumerate() {
        println!("{:>4}. {}", i + 1, cand);
    }
    Ok(())
}

fn run_keymap(layer: Option<KeyLayer>) {
    let translator = KeyTranslator::new();
    let layers: Vec<KeyLayer> = match layer {
        Some(layer) => vec![layer],
        None => KeyLayer::ALL.to_vec(),
    };
    for layer in layers {
        println!("[{}]", layer);
        for (key, ch) in translator.layer_entries(layer) {
            println!("  {}  U+{:04X}  {}", key, ch as u32, ch);
        }
        println!();
    }
}
