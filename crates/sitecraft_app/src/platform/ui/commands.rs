use sitecraft_core::DeviceMode;

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Prompt(String),
    Device(DeviceMode),
    /// 1-based transcript position as printed.
    Copy(usize),
    Download,
    Regenerate,
    Cancel,
    Open,
    Transcript,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
Type a description of your website and press Enter to generate it.
End a line with '\\' to continue the prompt on the next line.

  /mobile, /tablet, /desktop   switch preview device
  /copy <n>                    copy message n to the clipboard
  /download                    save the newest design as an HTML file
  /retry                       generate the last prompt again
  /cancel                      abandon the request in flight
  /open                        open the preview page in a browser
  /history                     print the whole transcript
  /help                        show this help
  /quit                        leave";

pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Some(Command::Prompt(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();

    let command = match (name.as_str(), arg) {
        ("device", Some(mode)) => match mode.parse::<DeviceMode>() {
            Ok(mode) => Command::Device(mode),
            Err(err) => Command::Invalid(err.to_string()),
        },
        ("mobile", None) => Command::Device(DeviceMode::Mobile),
        ("tablet", None) => Command::Device(DeviceMode::Tablet),
        ("desktop", None) => Command::Device(DeviceMode::Desktop),
        ("copy", Some(n)) => match n.parse::<usize>() {
            Ok(index) if index > 0 => Command::Copy(index),
            _ => Command::Invalid(format!("not a message number: {n}")),
        },
        ("download" | "save", None) => Command::Download,
        ("retry" | "refresh", None) => Command::Regenerate,
        ("cancel", None) => Command::Cancel,
        ("open", None) => Command::Open,
        ("history", None) => Command::Transcript,
        ("help" | "?", None) => Command::Help,
        ("quit" | "exit" | "q", None) => Command::Quit,
        _ => Command::Invalid(format!("unknown command: {trimmed}")),
    };
    Some(command)
}

/// Joins backslash-continued lines into a single prompt.
#[derive(Debug, Default)]
pub struct LineJoiner {
    pending: Option<String>,
}

impl LineJoiner {
    /// Returns the complete input once a line does not end in `\`.
    pub fn push(&mut self, line: &str) -> Option<String> {
        let (text, continues) = match line.strip_suffix('\\') {
            Some(head) => (head, true),
            None => (line, false),
        };
        let joined = match self.pending.take() {
            Some(mut buffer) => {
                buffer.push('\n');
                buffer.push_str(text);
                buffer
            }
            None => text.to_string(),
        };
        if continues {
            self.pending = Some(joined);
            None
        } else {
            Some(joined)
        }
    }
}
