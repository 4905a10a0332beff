/// Main 'entrypoint' for values that `tranqui` can invoke. Every `FnOnce`
/// of up to eight parameters implements it, with the parameters packed
/// into a tuple so a single generic `Args` covers all arities.
///
/// ```rust
/// use tranqui_core::callable::Callable;
///
/// fn add(a: i32, b: i32) -> i32 {
///     a + b
/// }
///
/// assert_eq!(add.call((1, 2)), 3);
/// assert_eq!((|| "hello").call(()), "hello");
/// ```
pub trait Callable<Args>: Sized {
    /// Whatever the function hands back, a `Result` or a future of one.
    type Output;

    /// Calls the function with unpacked `args`.
    fn call(self, args: Args) -> Self::Output;
}

macro_rules! implement_callable {
    ($($ty:ident),*) => {
        #[allow(non_snake_case)]
        impl<F, R, $($ty,)*> Callable<($($ty,)*)> for F
        where
            F: FnOnce($($ty,)*) -> R,
        {
            type Output = R;

            fn call(self, ($($ty,)*): ($($ty,)*)) -> Self::Output {
                self($($ty,)*)
            }
        }
    };
}

implement_callable!();
implement_callable!(T1);
implement_callable!(T1, T2);
implement_callable!(T1, T2, T3);
implement_callable!(T1, T2, T3, T4);
implement_callable!(T1, T2, T3, T4, T5);
implement_callable!(T1, T2, T3, T4, T5, T6);
implement_callable!(T1, T2, T3, T4, T5, T6, T7);
implement_callable!(T1, T2, T3, T4, T5, T6, T7, T8);
