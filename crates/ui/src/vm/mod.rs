mod chart_vm;

pub use chart_vm::{ChartSectionVm, TileVm, drawer_toggle_label, map_chart};
