#[macro_export]
/// Abort bring-up on a condition outside the engine's authority, such as an
/// access that falls outside a mapped register window.
macro_rules! platform_fatal {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        panic!(
            concat!("A fatal platform error occurred during board bring-up:\n\t",$fmt)
             $(, $($arg)+)?)
    }
}
