pub mod surf_descriptor;
