pub mod surf_matcher;
