use std::io::Cursor;

use detectx_prep::data::{image_size_question, parse_image_size, platform_question, prompt, prompt_platform_and_size};

#[test]
fn prompt_trims_the_answer() {
    let mut reader = Cursor::new(" A9 \n");
    let mut out: Vec<u8> = Vec::new();
    let answer = prompt(&mut reader, &mut out, "Enter platform (A8/A9/TPU): ").unwrap();
    assert_eq!(answer, "A9");
    assert_eq!(String::from_utf8(out).unwrap(), "Enter platform (A8/A9/TPU): ");
}

#[test]
fn prompt_fails_on_closed_input() {
    let mut reader = Cursor::new("");
    let mut out: Vec<u8> = Vec::new();
    let err = prompt(&mut reader, &mut out, "Enter image size (480/768/960): ").unwrap_err();
    assert!(err.to_string().contains("stdin closed"), "{}", err);
}

#[test]
fn image_size_parsing() {
    assert_eq!(parse_image_size(" 768 \n").unwrap(), 768);
    assert_eq!(parse_image_size("333").unwrap(), 333);

    let err = parse_image_size("abc").unwrap_err();
    assert!(err.to_string().contains("'abc'"), "{}", err);
    assert!(parse_image_size("").is_err());
    assert!(parse_image_size("-480").is_err());
}

#[test]
fn questions_list_the_choices() {
    assert_eq!(platform_question(), "Enter platform (A8/A9/TPU): ");
    assert_eq!(image_size_question(), "Enter image size (480/768/960): ");
}

#[test]
fn platform_and_size_in_order() {
    let mut reader = Cursor::new("tpu\n 960\n");
    let mut out: Vec<u8> = Vec::new();
    let (platform, image_size) = prompt_platform_and_size(&mut reader, &mut out).unwrap();
    assert_eq!(platform, "tpu");
    assert_eq!(image_size, 960);

    // size answer missing
    let mut reader = Cursor::new("A8\n");
    assert!(prompt_platform_and_size(&mut reader, &mut out).is_err());

    let mut reader = Cursor::new("A8\nbig\n");
    let err = prompt_platform_and_size(&mut reader, &mut out).unwrap_err();
    assert!(err.to_string().contains("'big'"), "{}", err);
}
