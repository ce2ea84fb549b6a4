pub mod alarm;
pub mod help;
pub mod input_box;
pub mod notice;
pub mod tasks;
pub mod utils;

pub use alarm::AlarmPanel;
pub use help::HelpLine;
pub use input_box::InputBox;
pub use notice::Notice;
pub use tasks::TaskList;
