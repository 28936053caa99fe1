mod question;

pub use question::QuestionCommands;
