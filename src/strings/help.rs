//! # Help Text
//!
//! Usage text for the `.project` command, shown for `help` and for an empty
//! invocation. Must stay byte-identical between invocations.

pub const MAIN: &str = concat!(
    "**📇 Roster Help**\n",
    "Use: .project _args_\n",
    "\n",
    "* [project]: Show who is responsible for a project\n",
    "* user [@user]: Show a user's projects (defaults to you)\n",
    "* list: All projects grouped by responsible person\n",
    "* help: This help\n"
);
