use crate::domain::value_objects::PackageManager;

/// A command suggested to the user after the project was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextStep {
    pub command: String,
    pub description: &'static str,
}

/// Commands available inside a freshly created project, in display order.
pub fn next_steps(manager: PackageManager) -> Vec<NextStep> {
    vec![
        NextStep {
            command: manager.run_script("dev"),
            description: "Starts the development server.",
        },
        NextStep {
            command: manager.run_script("build"),
            description: "Builds the app for production.",
        },
        NextStep {
            command: manager.start_command(),
            description: "Runs the built app in production mode.",
        },
    ]
}

/// The command we suggest the user types first.
pub fn first_command(manager: PackageManager) -> String {
    manager.run_script("dev")
}
