use clap::Parser;
use log::debug;
use msxdasm::config::ProjectConfig;
use msxdasm::navigator::NavigatorOptions;
use msxdasm::Disassembler;
use std::path::PathBuf;

/// Recursive-descent Z80 disassembler for MSX cartridge ROMs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cartridge ROM file
    rom: Option<PathBuf>,

    /// Load address in hex (default 4000)
    #[arg(short, long)]
    start: Option<String>,

    /// Execution address in hex (default: INIT vector from the header)
    #[arg(short, long)]
    exec: Option<String>,

    /// Address definition file, e.g. -d msxrom.def -d kvalley.def
    #[arg(short = 'd', long = "def", value_name = "FILE")]
    definitions: Vec<PathBuf>,

    /// Extra code entry point in hex, for unreachable code
    #[arg(short = 'p', long = "entry", value_name = "ADDR")]
    entry_points: Vec<String>,

    /// Output file, .asm for source or .lst for listing (default msxdasm.asm)
    #[arg(short, long = "output", value_name = "FILE")]
    outputs: Vec<PathBuf>,

    /// TOML project file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not follow bank-switch dispatch tables
    #[arg(long, default_value_t = false)]
    no_trampoline: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Command line settings in project file form
    fn overrides(&self) -> ProjectConfig {
        ProjectConfig {
            rom: self.rom.clone(),
            start: self.start.clone(),
            exec: self.exec.clone(),
            definitions: self.definitions.clone(),
            entry_points: self.entry_points.clone(),
            outputs: self.outputs.clone(),
            trampoline: self.no_trampoline.then_some(false),
        }
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    ))
    .init();

    eprintln!("=====================================================");
    eprintln!("MSXDASM v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("=====================================================");

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let project = match &args.config {
        Some(path) => ProjectConfig::load(path)?,
        None => ProjectConfig::default(),
    };
    let config = project.merge(args.overrides()).resolve()?;
    debug!("Configuration: {:?}", config);

    let mut disasm = Disassembler::with_options(NavigatorOptions {
        trampoline_heuristic: config.trampoline,
    });
    disasm.load_rom(&config.rom, config.start)?;

    if let Some(exec) = config.exec {
        disasm.set_exec_address(exec);
    }
    for path in &config.definitions {
        disasm.load_def(path)?;
    }
    for &addr in &config.entry_points {
        disasm.add_entry_point(addr);
    }

    disasm.navigate()?;

    eprintln!("Cartridge    : {}", config.rom.display());
    eprintln!("Start address: {:04x}", disasm.start_address());
    eprintln!("End address  : {:04x}", disasm.end_address());
    eprintln!("Exec address : {:04x}", disasm.exec_address());

    for path in &config.outputs {
        disasm.generate(path)?;
    }

    Ok(())
}
