pub mod containment;
pub mod preview;
pub mod scan;

/// Hard ceiling on directory expansion, regardless of what the request asks for.
pub const MAX_SCAN_DEPTH: usize = 5;

/// Hard ceiling on preview length in lines, regardless of what the request asks for.
pub const MAX_PREVIEW_LINES: usize = 1000;
