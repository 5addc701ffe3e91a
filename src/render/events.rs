/// Requests issued by a surface in response to user input
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Switch to the named puzzle
    Select(String),

    /// Switch to the puzzle after the current one, wrapping around
    SelectNext,

    /// Switch to the puzzle before the current one, wrapping around
    SelectPrevious,

    /// Start or pause timed stepping
    ToggleRunning,

    /// Execute a single step
    Step,

    /// Step without delay until the puzzle finishes
    RunToCompletion,

    /// Rebuild the current puzzle from scratch
    Reset,

    SetScale(f32),

    ScaleBy(f32),

    /// Raw text from the step interval field, in milliseconds
    SetStepInterval(String),

    Quit,
}
