pub mod hardclustering;
pub mod randompoints;
pub mod seededdistance;
pub mod uniformweights;
