use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "panelbuf", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print geometry and the required buffer size for a framebuffer descriptor.
    Info(InfoArgs),
    /// Render a raw framebuffer dump as a PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Framebuffer descriptor JSON (`{"width":128,"height":64,"format":"mono_vlsb"}`).
    #[arg(long)]
    desc: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Framebuffer descriptor JSON.
    #[arg(long)]
    desc: PathBuf,

    /// Raw buffer bytes, as sent to the panel.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn read_desc(path: &Path) -> anyhow::Result<panelbuf::FrameDesc> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read descriptor '{}'", path.display()))?;
    let desc = panelbuf::FrameDesc::from_json(&json)
        .with_context(|| format!("parse descriptor '{}'", path.display()))?;
    Ok(desc)
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let desc = read_desc(&args.desc)?;
    let fmt = desc.format.desc();
    println!("format:     {:?} (code {})", desc.format, desc.format.code());
    println!("bpp:        {}", fmt.bits_per_pixel);
    println!("size:       {}x{}", desc.width, desc.height);
    println!(
        "stride:     {} (packed {})",
        desc.requested_stride(),
        desc.packed_stride()
    );
    println!("byte_len:   {}", desc.byte_len());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let desc = read_desc(&args.desc)?;
    let raw = std::fs::read(&args.in_path)
        .with_context(|| format!("read raw buffer '{}'", args.in_path.display()))?;
    let fb = panelbuf::FrameBuffer::from_desc(raw.as_slice(), desc)
        .with_context(|| format!("wrap raw buffer '{}'", args.in_path.display()))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    fb.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
