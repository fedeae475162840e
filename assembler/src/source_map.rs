//! Per-instruction source line records, for diagnostic tooling built on top
//! of assembled bytecode.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceMapItem {
    pub line: usize,
}

pub type SourceMap = Vec<SourceMapItem>;
