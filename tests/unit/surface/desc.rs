use super::*;

#[test]
fn byte_len_matches_reference_sizes() {
    assert_eq!(FrameDesc::new(50, 32, PixelFormat::MonoVlsb).byte_len(), 200);
    assert_eq!(FrameDesc::new(8, 8, PixelFormat::MonoVlsb).byte_len(), 8);
    assert_eq!(FrameDesc::new(128, 64, PixelFormat::Rgb565).byte_len(), 128 * 64 * 2);
    assert_eq!(FrameDesc::new(10, 3, PixelFormat::MonoHlsb).byte_len(), 6);
    assert_eq!(FrameDesc::new(5, 2, PixelFormat::Gs2Hmsb).byte_len(), 4);
    assert_eq!(FrameDesc::new(3, 3, PixelFormat::Gs4Hmsb).byte_len(), 6);
    assert_eq!(FrameDesc::new(7, 2, PixelFormat::Gs8).byte_len(), 14);
}

#[test]
fn last_row_only_needs_width() {
    let d = FrameDesc::new(4, 3, PixelFormat::Gs8).with_stride(10);
    assert_eq!(d.byte_len(), 24);

    let d = FrameDesc::new(4, 9, PixelFormat::MonoVlsb).with_stride(6);
    assert_eq!(d.byte_len(), 10);
}

#[test]
fn packed_stride_rounds_to_whole_bytes() {
    assert_eq!(FrameDesc::new(10, 1, PixelFormat::MonoHmsb).packed_stride(), 16);
    assert_eq!(FrameDesc::new(10, 1, PixelFormat::Gs2Hmsb).packed_stride(), 12);
    assert_eq!(FrameDesc::new(9, 1, PixelFormat::Gs4Hmsb).packed_stride(), 10);
    assert_eq!(FrameDesc::new(9, 1, PixelFormat::MonoVlsb).packed_stride(), 9);
    assert_eq!(FrameDesc::new(9, 1, PixelFormat::Rgb565).packed_stride(), 9);
}

#[test]
fn validate_rejects_bad_geometry() {
    assert!(FrameDesc::new(0, 4, PixelFormat::Gs8).validate().is_err());
    assert!(FrameDesc::new(4, 0, PixelFormat::Gs8).validate().is_err());
    assert!(FrameDesc::new(0x1_0000, 1, PixelFormat::Gs8).validate().is_err());
    let err = FrameDesc::new(8, 4, PixelFormat::Gs8)
        .with_stride(7)
        .validate()
        .unwrap_err();
    assert!(matches!(err, PanelError::Config(_)));
    assert!(FrameDesc::new(8, 4, PixelFormat::Gs8).with_stride(8).validate().is_ok());
}

#[test]
fn from_json_reads_config() {
    let d = FrameDesc::from_json(r#"{"width":128,"height":64,"format":"mono_vlsb"}"#).unwrap();
    assert_eq!(d, FrameDesc::new(128, 64, PixelFormat::MonoVlsb));

    let d = FrameDesc::from_json(r#"{"width":8,"height":8,"format":"gs8","stride":16}"#).unwrap();
    assert_eq!(d.requested_stride(), 16);
}

#[test]
fn from_json_reports_serde_and_config_errors() {
    let err = FrameDesc::from_json(r#"{"width":8,"height":8,"format":"cmyk"}"#).unwrap_err();
    assert!(matches!(err, PanelError::Serde(_)));

    let err =
        FrameDesc::from_json(r#"{"width":8,"height":8,"format":"gs8","stride":4}"#).unwrap_err();
    assert!(matches!(err, PanelError::Config(_)));
}
