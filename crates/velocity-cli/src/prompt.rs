//! Interactive prompting.
//!
//! With the `interactive` feature the questions are asked through
//! `dialoguer`. Without it, any attempt to prompt fails and is reported as
//! [`CliError::FeatureNotAvailable`].

use velocity_core::{
    application::{
        ApplicationError,
        ports::{Answers, Prompter, Question},
    },
    error::{VelocityError, VelocityResult},
};

use crate::error::CliError;

/// Reason used when this build cannot prompt.
const INTERACTIVE_DISABLED: &str = "interactive prompts are not available in this build";

/// The prompter for this build.
pub fn prompter(no_color: bool) -> Box<dyn Prompter> {
    #[cfg(feature = "interactive")]
    {
        Box::new(interactive::DialoguerPrompter::new(no_color))
    }
    #[cfg(not(feature = "interactive"))]
    {
        let _ = no_color;
        Box::new(DisabledPrompter)
    }
}

/// Convert a resolver error, recognising the "cannot prompt" case.
pub fn explain(err: VelocityError) -> CliError {
    match &err {
        VelocityError::Application(ApplicationError::PromptFailed { reason })
            if reason == INTERACTIVE_DISABLED =>
        {
            CliError::FeatureNotAvailable {
                feature: "interactive",
            }
        }
        _ => CliError::Core(err),
    }
}

/// Prompter for builds without the `interactive` feature.
#[cfg_attr(feature = "interactive", allow(dead_code))]
struct DisabledPrompter;

impl Prompter for DisabledPrompter {
    fn ask(&self, _questions: &[Question]) -> VelocityResult<Option<Answers>> {
        Err(ApplicationError::PromptFailed {
            reason: INTERACTIVE_DISABLED.into(),
        }
        .into())
    }
}

#[cfg(feature = "interactive")]
mod interactive {
    use std::io;

    use dialoguer::{
        Confirm, Input,
        theme::{ColorfulTheme, SimpleTheme, Theme},
    };
    use tracing::debug;
    use velocity_core::{
        application::{
            ApplicationError,
            ports::{Answers, Prompter, Question},
        },
        error::VelocityResult,
    };

    /// Asks questions on the terminal.
    pub struct DialoguerPrompter {
        theme: Box<dyn Theme>,
    }

    impl DialoguerPrompter {
        pub fn new(no_color: bool) -> Self {
            let theme: Box<dyn Theme> = if no_color {
                Box::new(SimpleTheme)
            } else {
                Box::new(ColorfulTheme::default())
            };
            Self { theme }
        }
    }

    impl Prompter for DialoguerPrompter {
        fn ask(&self, questions: &[Question]) -> VelocityResult<Option<Answers>> {
            let mut answers = Answers::default();

            for question in questions {
                match question {
                    Question::ProjectDirectory { message, initial } => {
                        let reply = Input::<String>::with_theme(self.theme.as_ref())
                            .with_prompt(message.as_str())
                            .default(initial.clone())
                            .interact_text();
                        match reply {
                            Ok(directory) => answers.project_directory = Some(directory),
                            Err(e) => return cancelled_or_failed(e),
                        }
                    }
                    Question::Toggle {
                        feature,
                        message,
                        initial,
                    } => {
                        let reply = Confirm::with_theme(self.theme.as_ref())
                            .with_prompt(message.as_str())
                            .default(*initial)
                            .interact_opt();
                        match reply {
                            Ok(Some(enabled)) => {
                                answers.toggles.insert(*feature, enabled);
                            }
                            Ok(None) => {
                                debug!(%feature, "Prompt dismissed");
                                return Ok(None);
                            }
                            Err(e) => return cancelled_or_failed(e),
                        }
                    }
                }
            }

            Ok(Some(answers))
        }
    }

    /// Ctrl-C cancels the session; anything else is a failure.
    fn cancelled_or_failed(err: dialoguer::Error) -> VelocityResult<Option<Answers>> {
        match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            other => Err(ApplicationError::PromptFailed {
                reason: other.to_string(),
            }
            .into()),
        }
    }
}
