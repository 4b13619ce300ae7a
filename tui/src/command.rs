//! Application commands and their string representations.

use std::str::FromStr;

/// All commands the plan viewer can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    NextDay,
    PrevDay,
    Today,
    NextWeek,
    PrevWeek,
    NextExercise,
    PrevExercise,
    Regenerate,
    Reload,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quit" => Ok(Self::Quit),
            "next-day" => Ok(Self::NextDay),
            "prev-day" => Ok(Self::PrevDay),
            "today" => Ok(Self::Today),
            "next-week" => Ok(Self::NextWeek),
            "prev-week" => Ok(Self::PrevWeek),
            "next-exercise" => Ok(Self::NextExercise),
            "prev-exercise" => Ok(Self::PrevExercise),
            "regenerate" => Ok(Self::Regenerate),
            "reload" => Ok(Self::Reload),
            _ => Err(()),
        }
    }
}
