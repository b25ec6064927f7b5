#[cfg(test)]
pub mod test {
    use std::collections::VecDeque;

    use crate::error::SurveyError;
    use crate::prompt::{PromptRequest, Prompter};
    use crate::validators;

    /// One scripted user response.
    #[derive(Debug, Clone)]
    pub enum Reply {
        Yes,
        No,
        /// Typed text. Empty text accepts the request's default.
        Type(String),
        Pick(String),
        PickMany(Vec<String>),
        CtrlC,
    }

    pub fn typed(s: &str) -> Reply {
        Reply::Type(s.to_string())
    }

    pub fn pick(s: &str) -> Reply {
        Reply::Pick(s.to_string())
    }

    pub fn pick_many(items: &[&str]) -> Reply {
        Reply::PickMany(items.iter().map(|s| s.to_string()).collect())
    }

    /// Replays replies in order. A reply that fails the request's checks is
    /// recorded in `rejections` and the next reply is used, the way a user
    /// would retype after an inline error.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        replies: VecDeque<Reply>,
        pub asked: Vec<String>,
        pub rejections: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
            Self {
                replies: replies.into_iter().collect(),
                ..Self::default()
            }
        }

        pub fn remaining(&self) -> usize {
            self.replies.len()
        }

        fn next(&mut self, req: &PromptRequest<'_>) -> Result<Reply, SurveyError> {
            match self.replies.pop_front() {
                Some(Reply::CtrlC) => Err(SurveyError::Interrupted),
                Some(reply) => Ok(reply),
                None => Err(SurveyError::Prompt(format!(
                    "no scripted reply for \"{}\"",
                    req.message
                ))),
            }
        }

        fn typed_answer(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError> {
            self.asked.push(req.message.to_string());
            loop {
                let text = match self.next(req)? {
                    Reply::Type(t) if t.is_empty() => req.default.unwrap_or_default().to_string(),
                    Reply::Type(t) => t,
                    other => return Err(unexpected(req, &other)),
                };
                match validators::check_text(req.checks, &text) {
                    Ok(()) => return Ok(text),
                    Err(msg) => self.rejections.push(msg),
                }
            }
        }
    }

    fn unexpected(req: &PromptRequest<'_>, reply: &Reply) -> SurveyError {
        SurveyError::Prompt(format!(
            "reply {reply:?} does not fit prompt \"{}\"",
            req.message
        ))
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, req: &PromptRequest<'_>, default: bool) -> Result<bool, SurveyError> {
            self.asked.push(req.message.to_string());
            match self.next(req)? {
                Reply::Yes => Ok(true),
                Reply::No => Ok(false),
                Reply::Type(t) if t.is_empty() => Ok(default),
                other => Err(unexpected(req, &other)),
            }
        }

        fn text(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError> {
            self.typed_answer(req)
        }

        fn password(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError> {
            self.typed_answer(req)
        }

        fn path(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError> {
            self.typed_answer(req)
        }

        fn select(
            &mut self,
            req: &PromptRequest<'_>,
            options: &[String],
        ) -> Result<String, SurveyError> {
            self.asked.push(req.message.to_string());
            match self.next(req)? {
                Reply::Pick(choice) if options.contains(&choice) => Ok(choice),
                other => Err(unexpected(req, &other)),
            }
        }

        fn multi_select(
            &mut self,
            req: &PromptRequest<'_>,
            options: &[String],
        ) -> Result<Vec<String>, SurveyError> {
            self.asked.push(req.message.to_string());
            loop {
                let picked = match self.next(req)? {
                    Reply::PickMany(items) if items.iter().all(|i| options.contains(i)) => items,
                    other => return Err(unexpected(req, &other)),
                };
                let ordered: Vec<String> = options
                    .iter()
                    .filter(|o| picked.contains(o))
                    .cloned()
                    .collect();
                match validators::check_selection(req.checks, ordered.len()) {
                    Ok(()) => return Ok(ordered),
                    Err(msg) => self.rejections.push(msg),
                }
            }
        }
    }

    #[test]
    fn scripted_prompter_retries_after_rejection() {
        let checks = [validators::Check::MinLength(8)];
        let req = PromptRequest {
            checks: &checks,
            ..PromptRequest::new("Password")
        };
        let mut p = ScriptedPrompter::new([typed("short"), typed("longer-pass")]);
        assert_eq!(p.password(&req).unwrap(), "longer-pass");
        assert_eq!(p.rejections, vec!["password must be at least 8 characters"]);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn scripted_prompter_empty_text_takes_default() {
        let req = PromptRequest {
            default: Some("demo"),
            ..PromptRequest::new("Name")
        };
        let mut p = ScriptedPrompter::new([typed("")]);
        assert_eq!(p.text(&req).unwrap(), "demo");
    }
}
