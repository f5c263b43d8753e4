//! Upstream message assembly.

use charla_types::llm::Message;

/// Builds the message list sent upstream for one request.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_prompt: String,
    context_header: String,
}

impl PromptAssembler {
    pub fn new(system_prompt: impl Into<String>, context_header: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            context_header: context_header.into(),
        }
    }

    /// System instruction, then the history verbatim and in order, then the
    /// retrieved context as a trailing system message when there is any.
    pub fn assemble(&self, history: &[Message], context: Option<&str>) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(self.system_prompt.clone()));
        messages.extend(history.iter().cloned());

        if let Some(context) = context.filter(|c| !c.is_empty()) {
            messages.push(Message::system(format!(
                "{}\n{context}",
                self.context_header
            )));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charla_types::llm::MessageRole;

    fn assembler() -> PromptAssembler {
        PromptAssembler::new("Eres un asistente.", "Información relevante de documentos:")
    }

    #[test]
    fn history_follows_system_prompt_in_order() {
        let history = vec![
            Message::user("uno"),
            Message::assistant("dos"),
            Message::user("tres"),
        ];
        let messages = assembler().assemble(&history, None);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], Message::system("Eres un asistente."));
        assert_eq!(&messages[1..], &history[..]);
    }

    #[test]
    fn context_is_appended_as_system_message() {
        let messages = assembler().assemble(&[Message::user("gótica")], Some("arcos\nbóvedas"));
        let last = messages.last().unwrap();
        assert_eq!(last.role, MessageRole::System);
        assert_eq!(last.content, "Información relevante de documentos:\narcos\nbóvedas");
    }

    #[test]
    fn empty_context_adds_nothing() {
        let messages = assembler().assemble(&[Message::user("x")], Some(""));
        assert_eq!(messages.len(), 2);
    }
}
