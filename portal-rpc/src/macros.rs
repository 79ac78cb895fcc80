/// Declare typed operations.
///
/// ```ignore
/// portal_ops! {
///     /// All exams visible to the caller.
///     ExamsList = "exams.list": () => Vec<Exam>;
/// }
/// ```
///
/// Each entry becomes a unit struct implementing [`Operation`][crate::Operation].
/// A `NAMES` constant listing every declared operation name is generated
/// alongside.
#[macro_export]
macro_rules! portal_ops {
    {
        $($(#[$meta:meta])* $op:ident = $name:literal : $body:ty => $data:ty;)*
    } => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $op;

            impl $crate::Operation for $op {
                const NAME: &'static str = $name;

                type Body = $body;
                type Data = $data;
            }
        )*

        pub const NAMES: &[&str] = &[$($name),*];
    }
}
