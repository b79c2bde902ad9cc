use std::path::PathBuf;

use panelbuf::{BlitOpts, FrameBuffer, FrameDesc, PixelFormat, rgb565};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let out_dir = PathBuf::from("assets");
    std::fs::create_dir_all(&out_dir)?;

    // A 1 bpp icon, drawn the way glyph data usually arrives.
    let mut icon = FrameBuffer::zeroed(FrameDesc::new(16, 16, PixelFormat::MonoHlsb))?;
    icon.rect(0, 0, 16, 16, 1, false);
    icon.line(0, 0, 15, 15, 1);
    icon.line(15, 0, 0, 15, 1);

    let mut colors = FrameBuffer::zeroed(FrameDesc::new(2, 1, PixelFormat::Rgb565))?;
    colors.set_pixel(1, 0, rgb565(255, 196, 0));

    let mut panel = FrameBuffer::zeroed(FrameDesc::new(128, 64, PixelFormat::Rgb565))?;
    panel.fill(rgb565(18, 20, 28));
    panel.fill_rect(4, 4, 120, 12, rgb565(40, 90, 200));
    for i in 0..6 {
        panel.blit(
            &icon,
            8 + i * 20,
            28,
            BlitOpts::new().with_key(0).with_palette(&colors),
        )?;
    }
    panel.scroll(0, -2);
    panel.save_png(&out_dir.join("panel_rgb565.png"))?;

    let mut mono = FrameBuffer::zeroed(FrameDesc::new(128, 64, PixelFormat::MonoVlsb))?;
    mono.blit(&panel, 0, 0, BlitOpts::new())?;
    mono.blit_within(panelbuf::Rect::new(0, 24, 64, 24), 64, 30, None);
    mono.save_png(&out_dir.join("panel_mono_vlsb.png"))?;

    println!("wrote {}", out_dir.display());
    Ok(())
}
