//! Rental protocol command parsing and response formatting.

/// Normalize one raw input line into a command token: strip trailing
/// whitespace and control characters, then ASCII-uppercase. Applied
/// identically in every session phase.
pub fn normalize(line: &str) -> String {
    line.trim_end_matches(|c: char| c.is_whitespace() || c.is_control())
        .to_ascii_uppercase()
}

/// Parsed rental command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `HELO <argument>`. The argument is everything after the single
    /// space, verbatim; it is compared as a literal string, so extra
    /// spaces are part of the argument and fail the handshake.
    Helo(String),
    Browse,
    Rent,
    MyGames,
    Bye,
    /// Anything else; always answered with `400 BAD REQUEST`.
    Unknown,
}

impl Command {
    /// Parse a normalized token into a command.
    pub fn parse(token: &str) -> Command {
        match token {
            "BYE" => Command::Bye,
            "BROWSE" => Command::Browse,
            "RENT" => Command::Rent,
            "MYGAMES" => Command::MyGames,
            other => match other.strip_prefix("HELO ") {
                Some(arg) => Command::Helo(arg.to_string()),
                None => Command::Unknown,
            },
        }
    }
}

/// Fixed response strings, terminator included.
pub mod response {
    /// Handshake success, echoing the peer's address.
    pub fn helo(peer: &str) -> String {
        format!("HELO {peer} (TCP)\r\n")
    }

    pub fn bad_request() -> &'static str {
        "400 BAD REQUEST\r\n"
    }

    pub fn bye() -> &'static str {
        "200 BYE\r\n"
    }

    pub fn browse() -> &'static str {
        "210 Switched to Browse Mode\r\n"
    }

    pub fn rent() -> &'static str {
        "220 Switched to Rent Mode\r\n"
    }

    pub fn mygames() -> &'static str {
        "230 Switched to Mygames Mode\r\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uppercases() {
        assert_eq!(normalize("helo myhost"), "HELO MYHOST");
        assert_eq!(normalize("browse"), "BROWSE");
    }

    #[test]
    fn test_normalize_strips_trailing_whitespace_and_control() {
        assert_eq!(normalize("bye\r\n"), "BYE");
        assert_eq!(normalize("rent  \t"), "RENT");
        assert_eq!(normalize("mygames\0"), "MYGAMES");
    }

    #[test]
    fn test_normalize_keeps_leading_and_interior_whitespace() {
        assert_eq!(normalize(" browse"), " BROWSE");
        assert_eq!(normalize("helo  x"), "HELO  X");
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("BYE"), Command::Bye);
        assert_eq!(Command::parse("BROWSE"), Command::Browse);
        assert_eq!(Command::parse("RENT"), Command::Rent);
        assert_eq!(Command::parse("MYGAMES"), Command::MyGames);
        assert_eq!(
            Command::parse("HELO MYHOST"),
            Command::Helo("MYHOST".to_string())
        );
        assert_eq!(Command::parse("LIST"), Command::Unknown);
        assert_eq!(Command::parse(""), Command::Unknown);
    }

    #[test]
    fn test_helo_argument_taken_verbatim() {
        // The extra space stays in the argument; the handshake comparison
        // is literal string equality.
        assert_eq!(
            Command::parse("HELO  MYHOST"),
            Command::Helo(" MYHOST".to_string())
        );
        // Bare HELO with no space is not a handshake attempt.
        assert_eq!(Command::parse("HELO"), Command::Unknown);
    }

    #[test]
    fn test_response_strings() {
        assert_eq!(response::helo("127.0.0.1"), "HELO 127.0.0.1 (TCP)\r\n");
        assert_eq!(response::bad_request(), "400 BAD REQUEST\r\n");
        assert_eq!(response::bye(), "200 BYE\r\n");
        assert_eq!(response::browse(), "210 Switched to Browse Mode\r\n");
        assert_eq!(response::rent(), "220 Switched to Rent Mode\r\n");
        assert_eq!(response::mygames(), "230 Switched to Mygames Mode\r\n");
    }
}
