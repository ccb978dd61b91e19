pub const GREETING: &str = "Hello! 👋 I'm your AI writing assistant. How can I help you today? \
I can answer questions about our features, pricing, or help you get started!";

pub const PRICING: &str = "We offer three pricing tiers:\n\n\
💫 Starter ($29/mo) - Perfect for individuals\n\
🚀 Pro ($79/mo) - Best for professionals (Most Popular!)\n\
🏢 Enterprise (Custom) - For large teams\n\n\
All plans include a 14-day free trial. Would you like to know more about a specific plan?";

pub const FEATURES: &str = "WriteAI Pro offers 20+ AI-powered writing tools including:\n\n\
📝 Blog Post Generator\n📧 Email Writer\n📱 Social Media Posts\n✨ Content Improver\n\
🛍️ Product Descriptions\n📊 SEO Optimization\n🔍 Plagiarism Checker\n👥 Team Collaboration\n\n\
What would you like to know more about?";

pub const TRIAL: &str = "Great choice! 🎉 Our 14-day free trial includes:\n\n\
✓ Access to all Pro features\n✓ 10,000 words to test\n✓ No credit card required\n\
✓ Cancel anytime\n✓ Full customer support\n\n\
Ready to start? Click the 'Start Free Trial' button on any pricing card!";

pub const COMPARISON: &str = "WriteAI Pro stands out because:\n\n\
✅ Better AI quality than competitors\n✅ More affordable ($79 vs $99+ for similar features)\n\
✅ Custom AI training (Enterprise only)\n✅ Superior customer support\n\
✅ No hidden fees or usage caps\n\n\
Want to see a detailed comparison table?";

pub const DEFAULT: &str = "That's a great question! Our AI writing assistant can help you with:\n\n\
• Creating any type of content\n• Improving existing writing\n• SEO optimization\n\
• Team collaboration\n\n\
Could you be more specific about what you'd like to know? \
Or type 'pricing', 'features', or 'trial' for quick info!";

// Checked in order; the first group with a matching keyword wins.
const RULES: &[(&[&str], &str)] = &[
    (&["price", "pricing", "cost", "plan"], PRICING),
    (&["feature", "tool", "what can", "capability"], FEATURES),
    (&["trial", "free", "test"], TRIAL),
    (&["compare", "competitor", "vs", "better"], COMPARISON),
    (&["hello", "hi", "hey"], GREETING),
];

/// Canned reply for a user message. Matching is a case-insensitive substring search.
pub fn reply(message: &str) -> &'static str {
    let message = message.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| message.contains(k)))
        .map(|(_, response)| *response)
        .unwrap_or(DEFAULT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: usize,
    pub sender: Sender,
    pub text: String,
}

/// A chat transcript that starts with the greeting.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: 1,
                sender: Sender::Bot,
                text: GREETING.to_string(),
            }],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends the user's message and the bot's answer. Blank input is ignored.
    pub fn send(&mut self, input: &str) -> Option<&'static str> {
        if input.trim().is_empty() {
            return None;
        }
        let answer = reply(input);
        self.push(Sender::User, input.to_string());
        self.push(Sender::Bot, answer.to_string());
        Some(answer)
    }

    fn push(&mut self, sender: Sender, text: String) {
        let id = self.messages.len() + 1;
        self.messages.push(ChatMessage { id, sender, text });
    }
}
