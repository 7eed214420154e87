use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

use crate::common::{TargetPlatform, KNOWN_IMAGE_SIZES};

/// Writes `question` to `writer` and reads one trimmed answer line from `reader`.
pub fn prompt<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, question: &str) -> Result<String> {
    write!(writer, "{}", question)?;
    writer.flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        bail!("No answer to '{}': stdin closed", question.trim_end());
    }
    Ok(answer.trim().to_string())
}

pub fn parse_image_size(answer: &str) -> Result<u32> {
    let answer = answer.trim();
    answer.parse::<u32>()
        .with_context(|| format!("Invalid image size '{}'", answer))
}

pub fn platform_question() -> String {
    format!("Enter platform ({}): ", TargetPlatform::all_platforms().join("/"))
}

pub fn image_size_question() -> String {
    let sizes = KNOWN_IMAGE_SIZES.iter().map(|x| x.to_string()).collect::<Vec<String>>().join("/");
    format!("Enter image size ({}): ", sizes)
}

/// Asks for the platform and the image size, in that order.
pub fn prompt_platform_and_size<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<(String, u32)> {
    let platform = prompt(reader, writer, &platform_question())?;
    let image_size = prompt(reader, writer, &image_size_question())?;
    Ok((platform, parse_image_size(&image_size)?))
}
