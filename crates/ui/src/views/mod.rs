mod chart;
mod dialog;
mod exam;
pub(crate) mod scripts;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chart::QuestionChart;
pub use dialog::SubmitDialog;
pub use exam::ExamView;
