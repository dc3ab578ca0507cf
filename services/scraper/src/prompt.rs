use std::io::{self, BufRead, Write};

/// Reads extra job board URLs until an empty line or end of input.
/// Entries that do not start with `http` are rejected with a hint.
pub(crate) fn prompt_for_urls<R, W>(mut input: R, output: &mut W) -> io::Result<Vec<String>>
where
    R: BufRead,
    W: Write,
{
    let mut urls = Vec::new();
    writeln!(
        output,
        "\nEnter additional job board URLs (press Enter with empty input to finish):"
    )?;

    loop {
        write!(output, "Enter URL: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let url = line.trim();
        if url.is_empty() {
            break;
        }

        if url.starts_with("http") {
            writeln!(output, "Added: {url}")?;
            urls.push(url.to_string());
        } else {
            writeln!(
                output,
                "Please enter a valid URL starting with http:// or https://"
            )?;
        }
    }

    Ok(urls)
}
