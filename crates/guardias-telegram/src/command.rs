/// A chat command recognised by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/ayuda` or `/help`
    Help,
    /// `/agregar NOMBRE YYYY-MM-DD [SEMANAS]`
    ///
    /// Date and week count stay raw text; validating them is the store's job.
    Register {
        person: String,
        date: String,
        weeks: Option<String>,
    },
    /// `/guardias [AÑO MES]`; `None` means the current month.
    Month(Option<(i32, u32)>),
    /// `/todas`
    All,
    /// A known command with missing or malformed arguments.
    Usage(Usage),
    /// Anything else that starts with `/`.
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Register,
    Month,
}

impl Command {
    /// Parse a message text. Returns `None` when the text is not a command.
    ///
    /// A `@botname` suffix on the command word is ignored, so `/agregar@guardias_bot`
    /// in a group chat behaves like `/agregar`.
    pub fn parse(text: &str) -> Option<Command> {
        let mut words = text.split_whitespace();
        let head = words.next()?.strip_prefix('/')?;
        let name = head.split('@').next().unwrap_or(head);
        let args: Vec<&str> = words.collect();

        let cmd = match name.to_lowercase().as_str() {
            "start" => Command::Start,
            "ayuda" | "help" => Command::Help,
            "todas" => Command::All,
            "agregar" => match args.as_slice() {
                [person, date] => Command::Register {
                    person: person.to_string(),
                    date: date.to_string(),
                    weeks: None,
                },
                [person, date, weeks] => Command::Register {
                    person: person.to_string(),
                    date: date.to_string(),
                    weeks: Some(weeks.to_string()),
                },
                _ => Command::Usage(Usage::Register),
            },
            "guardias" => match args.as_slice() {
                [] => Command::Month(None),
                [year, month] => match (year.parse::<i32>(), month.parse::<u32>()) {
                    (Ok(y), Ok(m)) => Command::Month(Some((y, m))),
                    _ => Command::Usage(Usage::Month),
                },
                _ => Command::Usage(Usage::Month),
            },
            _ => Command::Unknown(name.to_string()),
        };
        Some(cmd)
    }
}
