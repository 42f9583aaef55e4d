//! TwiML response documents
//!
//! A small builder for the declarative markup Twilio executes: `<Say>`
//! and `<Gather>` for voice, `<Message>` with an optional `<Media>` for
//! SMS. Serialization matches the provider library's output byte for
//! byte (XML declaration, single body line, trailing newline) so bodies
//! can be compared verbatim in tests.

use std::fmt;

use crate::config::InputMode;

/// A `<Say>` prompt.
///
/// Voice and language attributes are emitted only when set; setting an
/// empty string still emits the attribute, matching how the drivers
/// apply unconfigured channel defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Say {
    text: String,
    voice: Option<String>,
    language: Option<String>,
}

impl Say {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            language: None,
        }
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn write(&self, out: &mut String) {
        out.push_str("<Say");
        if let Some(voice) = &self.voice {
            out.push_str(" voice=\"");
            out.push_str(&escape(voice));
            out.push('"');
        }
        if let Some(language) = &self.language {
            out.push_str(" language=\"");
            out.push_str(&escape(language));
            out.push('"');
        }
        out.push('>');
        out.push_str(&escape(&self.text));
        out.push_str("</Say>");
    }
}

impl From<&str> for Say {
    fn from(text: &str) -> Self {
        Say::new(text)
    }
}

impl From<String> for Say {
    fn from(text: String) -> Self {
        Say::new(text)
    }
}

/// A `<Gather>` prompt collecting touch-tone or speech input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gather {
    input: InputMode,
    says: Vec<Say>,
}

impl Gather {
    pub fn new(input: InputMode) -> Self {
        Self {
            input,
            says: Vec::new(),
        }
    }

    pub fn say(mut self, say: impl Into<Say>) -> Self {
        self.says.push(say.into());
        self
    }

    fn write(&self, out: &mut String) {
        out.push_str("<Gather input=\"");
        out.push_str(self.input.as_str());
        out.push_str("\">");
        for say in &self.says {
            say.write(out);
        }
        out.push_str("</Gather>");
    }
}

/// A `<Message>` reply with an optional `<Media>` attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    body: String,
    media: Option<String>,
}

impl Message {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            media: None,
        }
    }

    pub fn media(mut self, url: impl Into<String>) -> Self {
        self.media = Some(url.into());
        self
    }

    fn write(&self, out: &mut String) {
        out.push_str("<Message><Body>");
        out.push_str(&escape(&self.body));
        out.push_str("</Body>");
        if let Some(media) = &self.media {
            out.push_str("<Media>");
            out.push_str(&escape(media));
            out.push_str("</Media>");
        }
        out.push_str("</Message>");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Verb {
    Say(Say),
    Gather(Gather),
    Message(Message),
}

/// A `<Response>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Twiml {
    verbs: Vec<Verb>,
}

impl Twiml {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&mut self, say: impl Into<Say>) -> &mut Self {
        self.verbs.push(Verb::Say(say.into()));
        self
    }

    pub fn gather(&mut self, gather: Gather) -> &mut Self {
        self.verbs.push(Verb::Gather(gather));
        self
    }

    pub fn message(&mut self, message: Message) -> &mut Self {
        self.verbs.push(Verb::Message(message));
        self
    }
}

impl fmt::Display for Twiml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>");
        for verb in &self.verbs {
            match verb {
                Verb::Say(say) => say.write(&mut out),
                Verb::Gather(gather) => gather.write(&mut out),
                Verb::Message(message) => message.write(&mut out),
            }
        }
        out.push_str("</Response>\n");
        f.write_str(&out)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response() {
        let twiml = Twiml::new();
        assert_eq!(
            twiml.to_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response></Response>\n"
        );
    }

    #[test]
    fn test_say_without_attributes() {
        let mut twiml = Twiml::new();
        twiml.say("custom twiml");
        assert_eq!(
            twiml.to_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Say>custom twiml</Say></Response>\n"
        );
    }

    #[test]
    fn test_say_with_empty_attributes() {
        let mut twiml = Twiml::new();
        twiml.say(Say::new("string").voice("").language(""));
        assert_eq!(
            twiml.to_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Say voice=\"\" language=\"\">string</Say></Response>\n"
        );
    }

    #[test]
    fn test_gather_with_says() {
        let mut twiml = Twiml::new();
        twiml.gather(
            Gather::new(InputMode::Dtmf)
                .say(Say::new("This is a question").voice("alice").language("en"))
                .say(Say::new("Button 1").voice("alice").language("en")),
        );
        assert_eq!(
            twiml.to_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Gather input=\"dtmf\"><Say voice=\"alice\" language=\"en\">This is a question</Say><Say voice=\"alice\" language=\"en\">Button 1</Say></Gather></Response>\n"
        );
    }

    #[test]
    fn test_message_with_media() {
        let mut twiml = Twiml::new();
        twiml.message(Message::new("look at this").media("https://example.com/logo.png"));
        assert_eq!(
            twiml.to_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Message><Body>look at this</Body><Media>https://example.com/logo.png</Media></Message></Response>\n"
        );
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let mut twiml = Twiml::new();
        twiml.say(Say::new("a < b & \"c\"").voice("<man>"));
        assert_eq!(
            twiml.to_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Say voice=\"&lt;man&gt;\">a &lt; b &amp; &quot;c&quot;</Say></Response>\n"
        );
    }
}
