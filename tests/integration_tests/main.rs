mod helpers;
mod pipeline_test;
