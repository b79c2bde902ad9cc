use super::*;
use crate::{format::pixel_format::PixelFormat, surface::desc::FrameDesc};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn fb(format: PixelFormat, w: u32, h: u32) -> FrameBuffer<Vec<u8>> {
    FrameBuffer::zeroed(FrameDesc::new(w, h, format)).unwrap()
}

fn noisy(format: PixelFormat, w: u32, h: u32, seed: u64) -> FrameBuffer<Vec<u8>> {
    let mut f = fb(format, w, h);
    let mut s = seed;
    for b in f.as_bytes_mut() {
        s = mix64(s.wrapping_add(0x9E37_79B9_7F4A_7C15));
        *b = s as u8;
    }
    f
}

/// Copy the clipped region pixel by pixel, reading everything before writing anything.
fn oracle_within(f: &mut FrameBuffer<Vec<u8>>, src: Rect, x: i32, y: i32, key: Option<u32>) {
    let (w, h) = (f.width() as usize, f.height() as usize);
    let Some(r) = Region::place(src, (w, h), x, y, (w, h)) else {
        return;
    };
    let mut staged = Vec::new();
    for j in 0..r.h {
        for i in 0..r.w {
            staged.push(f.pixel((r.sx + i) as i32, (r.sy + j) as i32));
        }
    }
    for j in 0..r.h {
        for i in 0..r.w {
            let c = staged[j * r.w + i];
            if Some(c) != key {
                f.set_pixel((r.dx + i) as i32, (r.dy + j) as i32, c);
            }
        }
    }
}

#[test]
fn region_place_clips_both_sides() {
    let r = Region::place(Rect::new(0, 0, 4, 4), (4, 4), -1, -2, (10, 10)).unwrap();
    assert_eq!(
        r,
        Region {
            sx: 1,
            sy: 2,
            dx: 0,
            dy: 0,
            w: 3,
            h: 2
        }
    );

    // The clipped-off source columns shift the placement right by two.
    let r = Region::place(Rect::new(-2, 1, 6, 2), (8, 8), 5, 5, (10, 10)).unwrap();
    assert_eq!(
        r,
        Region {
            sx: 0,
            sy: 1,
            dx: 7,
            dy: 5,
            w: 3,
            h: 2
        }
    );

    assert!(Region::place(Rect::new(0, 0, 4, 4), (4, 4), 10, 0, (10, 10)).is_none());
    assert!(Region::place(Rect::new(0, 0, 4, 4), (4, 4), -4, 0, (10, 10)).is_none());
    assert!(Region::place(Rect::new(9, 9, 4, 4), (4, 4), 0, 0, (10, 10)).is_none());
    assert!(Region::place(Rect::new(0, 0, 4, 4), (4, 4), i32::MIN, i32::MAX, (10, 10)).is_none());
}

#[test]
fn mono_sprite_through_rgb565_palette() {
    let mut sprite = fb(PixelFormat::MonoHlsb, 8, 8);
    sprite.set_pixel(3, 3, 1);
    let mut palette = fb(PixelFormat::Rgb565, 2, 1);
    palette.set_pixel(0, 0, 0x0000);
    palette.set_pixel(1, 0, 0xF800);

    let mut dst = fb(PixelFormat::Rgb565, 8, 8);
    assert!(
        dst.blit(&sprite, 0, 0, BlitOpts::new().with_palette(&palette))
            .unwrap()
    );
    for y in 0..8 {
        for x in 0..8 {
            let want = if (x, y) == (3, 3) { 0xF800 } else { 0 };
            assert_eq!(dst.pixel(x, y), want, "({x},{y})");
        }
    }
}

#[test]
fn palette_maps_each_index_and_key_skips_before_lookup() {
    let mut src = fb(PixelFormat::Gs2Hmsb, 4, 1);
    for x in 0..4 {
        src.set_pixel(x, 0, x as u32);
    }
    let mut palette = fb(PixelFormat::Gs8, 4, 1);
    for (i, c) in [10u32, 20, 30, 40].into_iter().enumerate() {
        palette.set_pixel(i as i32, 0, c);
    }

    let mut dst = fb(PixelFormat::Gs8, 4, 1);
    dst.fill(99);
    dst.blit(&src, 0, 0, BlitOpts::new().with_palette(&palette).with_key(2))
        .unwrap();
    let got: Vec<u32> = (0..4).map(|x| dst.pixel(x, 0)).collect();
    assert_eq!(got, vec![10, 20, 99, 40]);
}

#[test]
fn short_palette_yields_zero_past_its_width() {
    let mut src = fb(PixelFormat::Gs4Hmsb, 3, 1);
    src.set_pixel(0, 0, 1);
    src.set_pixel(1, 0, 7);
    src.set_pixel(2, 0, 15);
    let mut palette = fb(PixelFormat::Rgb565, 2, 1);
    palette.fill(0x1234);

    let mut dst = fb(PixelFormat::Rgb565, 3, 1);
    dst.fill(0xFFFF);
    dst.blit(&src, 0, 0, BlitOpts::new().with_palette(&palette))
        .unwrap();
    assert_eq!(
        (0..3).map(|x| dst.pixel(x, 0)).collect::<Vec<_>>(),
        vec![0x1234, 0, 0]
    );
}

#[test]
fn wide_source_palette_reads_directly() {
    let mut src = fb(PixelFormat::Rgb565, 2, 1);
    src.set_pixel(0, 0, 1);
    src.set_pixel(1, 0, 0xF000);
    let mut palette = fb(PixelFormat::Gs8, 2, 1);
    palette.set_pixel(1, 0, 77);

    let mut dst = fb(PixelFormat::Gs8, 2, 1);
    dst.fill(5);
    dst.blit(&src, 0, 0, BlitOpts::new().with_palette(&palette))
        .unwrap();
    assert_eq!(dst.pixel(0, 0), 77);
    assert_eq!(dst.pixel(1, 0), 0);
}

#[test]
fn palette_in_wrong_format_is_rejected() {
    let src = fb(PixelFormat::MonoHlsb, 8, 8);
    let palette = fb(PixelFormat::Gs8, 2, 1);
    let mut dst = fb(PixelFormat::Rgb565, 8, 8);
    let err = dst
        .blit(&src, 0, 0, BlitOpts::new().with_palette(&palette))
        .unwrap_err();
    assert!(matches!(err, PanelError::Config(_)));
    assert!(err.to_string().contains("palette format"));
    assert!(dst.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn palette_with_more_than_one_row_is_rejected() {
    let src = fb(PixelFormat::MonoHlsb, 8, 8);
    let palette = fb(PixelFormat::Rgb565, 2, 3);
    let mut dst = fb(PixelFormat::Rgb565, 8, 8);
    let err = dst
        .blit(&src, 0, 0, BlitOpts::new().with_palette(&palette))
        .unwrap_err();
    assert!(matches!(err, PanelError::Config(_)));
    assert!(err.to_string().contains("palette height must be 1"));
    assert!(dst.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn key_wider_than_source_depth_matches_nothing() {
    let src = fb(PixelFormat::Gs8, 2, 1);
    let mut dst = fb(PixelFormat::Gs8, 2, 1);
    dst.fill(9);
    dst.blit(&src, 0, 0, BlitOpts::new().with_key(0x100)).unwrap();
    assert_eq!(dst.as_bytes(), &[0, 0]);

    let mono = fb(PixelFormat::MonoHmsb, 8, 1);
    let mut dst = fb(PixelFormat::Gs8, 8, 1);
    dst.fill(5);
    dst.blit(&mono, 0, 0, BlitOpts::new().with_key(2)).unwrap();
    assert!(dst.as_bytes().iter().all(|&b| b == 0));

    let mut f = fb(PixelFormat::Gs4Hmsb, 4, 1);
    f.set_pixel(3, 0, 7);
    assert!(f.blit_within(Rect::new(0, 0, 2, 1), 2, 0, Some(0x10)));
    assert_eq!(f.pixel(2, 0), 0);
    assert_eq!(f.pixel(3, 0), 0);
}

#[test]
fn fully_clipped_blit_reports_false() {
    let src = noisy(PixelFormat::Gs8, 4, 4, 1);
    let mut dst = fb(PixelFormat::Gs8, 8, 8);
    assert!(!dst.blit(&src, 8, 0, BlitOpts::new()).unwrap());
    assert!(!dst.blit(&src, -4, 2, BlitOpts::new()).unwrap());
    assert!(!dst.blit(&src, 0, -100, BlitOpts::new()).unwrap());
    assert!(dst.as_bytes().iter().all(|&b| b == 0));
    assert!(dst.blit(&src, -3, -3, BlitOpts::new()).unwrap());
    assert_eq!(dst.pixel(0, 0), src.pixel(3, 3));
}

#[test]
fn key_leaves_destination_untouched() {
    for format in PixelFormat::ALL {
        let src = noisy(format, 9, 6, 3);
        let key = src.pixel(2, 1);
        let mut dst = noisy(format, 12, 12, 4);
        let before = dst.clone();
        dst.blit(&src, 2, 3, BlitOpts::new().with_key(key)).unwrap();
        for y in 0..6 {
            for x in 0..9 {
                let s = src.pixel(x, y);
                let want = if s == key { before.pixel(x + 2, y + 3) } else { s };
                assert_eq!(dst.pixel(x + 2, y + 3), want, "{format:?} ({x},{y})");
            }
        }
    }
}

#[test]
fn same_format_fast_paths_match_generic_copy() {
    let mut seed = 11u64;
    for format in PixelFormat::ALL {
        for (sw, sh, stride) in [(7u32, 5u32, 7u32), (13, 11, 16), (5, 17, 9)] {
            let bytes = {
                let desc = FrameDesc::new(sw, sh, format).with_stride(stride);
                let mut v = vec![0u8; desc.byte_len()];
                for b in &mut v {
                    seed = mix64(seed);
                    *b = seed as u8;
                }
                v
            };
            let src = FrameBuffer::with_stride(&bytes[..], sw, sh, format, stride).unwrap();
            for _ in 0..12 {
                seed = mix64(seed);
                let x = (seed % 30) as i32 - 8;
                let y = ((seed >> 8) % 30) as i32 - 8;
                let key = ((seed >> 16) & 1 == 1).then(|| src.pixel(1, 1));

                let mut fast = noisy(format, 19, 21, seed);
                let mut slow = fast.clone();
                let mut opts = BlitOpts::new();
                opts.key = key;
                let drawn = fast.blit(&src, x, y, opts).unwrap();

                let (sl, dl) = (src.layout, slow.layout);
                let r = Region::place(src.bounds(), (sl.width, sl.height), x, y, (19, 21));
                assert_eq!(drawn, r.is_some());
                if let Some(r) = r {
                    copy_mapped(&dl, slow.as_bytes_mut(), &sl, src.as_bytes(), r, |raw| {
                        (Some(raw) != key).then_some(raw)
                    });
                }
                assert_eq!(
                    fast.as_bytes(),
                    slow.as_bytes(),
                    "{format:?} {sw}x{sh}/{stride} at ({x},{y}) key {key:?}"
                );
            }
        }
    }
}

#[test]
fn cross_format_blit_converts_through_raw_values() {
    let mut src = fb(PixelFormat::Gs4Hmsb, 3, 2);
    src.set_pixel(0, 0, 0xF);
    src.set_pixel(2, 1, 0x9);
    let mut dst = fb(PixelFormat::Gs8, 4, 4);
    dst.blit(&src, 1, 1, BlitOpts::new()).unwrap();
    assert_eq!(dst.pixel(1, 1), 0xF);
    assert_eq!(dst.pixel(3, 2), 0x9);

    let mut mono = fb(PixelFormat::MonoVlsb, 4, 4);
    mono.blit(&dst, 0, 0, BlitOpts::new()).unwrap();
    assert_eq!(mono.pixel(1, 1), 1);
    assert_eq!(mono.pixel(3, 2), 1);
    assert_eq!(mono.pixel(0, 0), 0);
}

#[test]
fn blit_within_matches_staged_copy_in_every_direction() {
    let offsets = [
        (0, 0),
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (3, 2),
        (-3, 2),
        (3, -2),
        (-3, -2),
        (5, 9),
        (-9, -8),
        (0, 8),
        (1, -8),
    ];
    for format in PixelFormat::ALL {
        for (k, &(ox, oy)) in offsets.iter().enumerate() {
            for key in [None, Some(0)] {
                let src = Rect::new(2, 3, 11, 9);
                let mut fast = noisy(format, 17, 19, k as u64 + 40);
                let mut slow = fast.clone();
                let moved = fast.blit_within(src, src.x + ox, src.y + oy, key);
                oracle_within(&mut slow, src, src.x + ox, src.y + oy, key);
                assert!(moved);
                assert_eq!(
                    fast.as_bytes(),
                    slow.as_bytes(),
                    "{format:?} offset ({ox},{oy}) key {key:?}"
                );
            }
        }
    }
}

#[test]
fn blit_within_clips_source_and_destination() {
    let mut f = noisy(PixelFormat::MonoHlsb, 12, 10, 9);
    let mut oracle = f.clone();
    assert!(f.blit_within(Rect::new(-3, 4, 10, 10), 6, -2, None));
    oracle_within(&mut oracle, Rect::new(-3, 4, 10, 10), 6, -2, None);
    assert_eq!(f.as_bytes(), oracle.as_bytes());
    assert!(!f.blit_within(Rect::new(0, 0, 4, 4), 12, 0, None));
    assert!(!f.blit_within(Rect::new(20, 0, 4, 4), 0, 0, None));
}
