use crate::error::{PaymentError, Result};
use std::io;
use std::time::Duration;

/// A writing tool shown in the live demo, with the text it "generates".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritingTool {
    pub id: &'static str,
    pub name: &'static str,
    pub placeholder: &'static str,
    pub example_output: &'static str,
}

pub const TOOLS: &[WritingTool] = &[
    WritingTool {
        id: "blog",
        name: "Blog Post Generator",
        placeholder: "Enter your blog topic...",
        example_output: "# 10 Proven Strategies to Boost Your Productivity\n\n\
In today's fast-paced world, staying productive can feel like an uphill battle. \
Start by time-blocking your day, protect your deep-work hours, and review your \
progress every Friday.",
    },
    WritingTool {
        id: "email",
        name: "Email Writer",
        placeholder: "Describe the email you need...",
        example_output: "Subject: Following up on our conversation\n\n\
Hi Sarah,\n\nThank you for taking the time to speak with me yesterday. \
I've attached the proposal we discussed and would love to hear your thoughts.\n\n\
Best regards,\nAlex",
    },
    WritingTool {
        id: "social",
        name: "Social Media Posts",
        placeholder: "What do you want to post about?",
        example_output: "Big news! Our new feature just dropped and it's a game changer \
for content creators. Try it free today. #AI #Writing #Productivity",
    },
    WritingTool {
        id: "product",
        name: "Product Descriptions",
        placeholder: "Describe your product...",
        example_output: "Meet the ErgoFlow Chair: adaptive lumbar support, breathable mesh, \
and all-day comfort designed for the way you actually work.",
    },
];

pub fn find_tool(id: &str) -> Option<&'static WritingTool> {
    TOOLS.iter().find(|tool| tool.id == id)
}

/// Starts a demo generation. Blank input is refused.
pub fn generate(tool_id: &str, input: &str) -> Result<Typewriter> {
    if input.trim().is_empty() {
        return Err(PaymentError::Validation(
            "Please enter some input to generate content".to_string(),
        ));
    }
    let tool = find_tool(tool_id)
        .ok_or_else(|| PaymentError::MissingData(format!("no writing tool '{tool_id}'")))?;
    Ok(Typewriter::new(tool.example_output))
}

/// Reveals a text one character at a time.
///
/// Each item is the prefix shown so far; the last item is the whole text.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: &'static str,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &'static str) -> Self {
        Self { text, shown: 0 }
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.text.len()
    }

    /// Drives the reveal on a fixed interval, handing each new character to `sink`.
    ///
    /// Playback stops at the first error the sink returns.
    pub async fn play<F>(mut self, interval: Duration, mut sink: F) -> Result<&'static str>
    where
        F: FnMut(&str) -> io::Result<()>,
    {
        let mut ticker = tokio::time::interval(interval);
        let mut previous = 0;
        while let Some(prefix) = self.next() {
            ticker.tick().await;
            sink(&prefix[previous..])?;
            previous = prefix.len();
        }
        Ok(self.text)
    }
}

impl Iterator for Typewriter {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        let step = self.text[self.shown..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        self.shown += step;
        Some(&self.text[..self.shown])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_respects_char_boundaries() {
        let frames: Vec<_> = Typewriter::new("₹65").collect();
        assert_eq!(frames, vec!["₹", "₹6", "₹65"]);
    }

    #[test]
    fn test_generate_requires_input() {
        assert!(matches!(
            generate("blog", "  "),
            Err(PaymentError::Validation(_))
        ));
        assert!(matches!(
            generate("poetry", "roses"),
            Err(PaymentError::MissingData(_))
        ));
        let last = generate("email", "follow up").unwrap().last().unwrap();
        assert_eq!(last, find_tool("email").unwrap().example_output);
    }

    #[tokio::test]
    async fn test_play_streams_every_character() {
        let mut out = String::new();
        let full = Typewriter::new("hello")
            .play(Duration::from_millis(1), |chunk| {
                out.push_str(chunk);
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(out, "hello");
        assert_eq!(full, "hello");
    }

    #[tokio::test]
    async fn test_play_stops_on_closed_sink() {
        let mut written = 0;
        let err = Typewriter::new("hello")
            .play(Duration::from_millis(1), |_| {
                if written == 2 {
                    return Err(io::Error::from(io::ErrorKind::BrokenPipe));
                }
                written += 1;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Io(_)));
        assert_eq!(written, 2);
    }
}
