/// Reports the failed jobs of a check suite on the pull requests of its branch
pub mod run;
