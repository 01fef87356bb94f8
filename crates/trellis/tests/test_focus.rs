//! Integration tests for focus behavior.

#[cfg(test)]
mod tests {
    use trellis::testing::{TestRuntime, TestSurface, run_ttree};
    use trellis::{App, Context, FocusManager, Rect, Result, Widget};

    /// A widget with no behavior of its own.
    struct Blank;

    impl Widget for Blank {}

    #[test]
    fn focus_defaults_to_the_root() -> Result<()> {
        run_ttree(|app, _rt, tree| {
            assert_eq!(app.focused(), tree.root);
            assert!(app.is_focused(tree.root));
            assert!(!app.is_focused(tree.a_a.into()));
            Ok(())
        })
    }

    #[test]
    fn set_focus_moves_focus_and_schedules_a_redraw() -> Result<()> {
        run_ttree(|app, _rt, tree| {
            let mut surface = TestSurface::new();
            app.draw(&mut surface)?;
            assert!(!app.redraw_pending());

            assert!(app.set_focus(tree.a_a.into()));
            assert_eq!(app.focused(), tree.a_a.into());
            assert!(app.redraw_pending());

            // Focusing the already-focused widget changes nothing.
            assert!(!app.set_focus(tree.a_a.into()));
            Ok(())
        })
    }

    #[test]
    fn only_visible_enabled_tree_members_take_focus() -> Result<()> {
        run_ttree(|app, _rt, tree| {
            app.set_hidden(tree.a_a, true);
            assert!(!app.set_focus(tree.a_a.into()));
            assert_eq!(app.focused(), tree.root);

            app.set_hidden(tree.a_a, false);
            assert!(app.set_focus(tree.a_a.into()));

            app.set_enabled(tree.b_a, false);
            assert!(!app.set_focus(tree.b_a.into()));

            // A widget outside the tree cannot take focus either.
            let loose = app.insert(Blank);
            assert!(!app.set_focus(loose));
            Ok(())
        })
    }

    #[test]
    fn hiding_an_ancestor_blurs_the_subtree() -> Result<()> {
        run_ttree(|app, _rt, tree| {
            assert!(app.set_focus(tree.a_b.into()));
            app.set_hidden(tree.a, true);
            assert_eq!(app.focused(), tree.root);

            // Unhiding does not restore the old focus.
            app.set_hidden(tree.a, false);
            assert_eq!(app.focused(), tree.root);
            Ok(())
        })
    }

    #[test]
    fn disabling_an_ancestor_blurs_the_subtree() -> Result<()> {
        run_ttree(|app, _rt, tree| {
            assert!(app.set_focus(tree.b_b.into()));
            app.set_enabled(tree.b, false);
            assert_eq!(app.focused(), tree.root);
            assert!(!app.is_enabled(tree.b_b));
            Ok(())
        })
    }

    #[test]
    fn focus_drops_when_the_widget_leaves_the_tree() -> Result<()> {
        run_ttree(|app, rt, tree| {
            assert!(app.set_focus(tree.a_b.into()));
            let mut surface = TestSurface::new();
            app.draw(&mut surface)?;

            app.get_mut(tree.a)?.kids = vec![tree.a_a.into()];
            rt.step();
            app.frame(rt)?;
            assert_eq!(app.focused(), tree.root);
            assert!(app.redraw_pending());
            Ok(())
        })
    }

    #[test]
    fn removing_the_focused_subtree_hands_focus_to_the_root() -> Result<()> {
        run_ttree(|app, rt, tree| {
            assert!(app.set_focus(tree.b_b.into()));
            app.get_mut(tree.b)?.kids = vec![tree.b_a.into()];
            app.remove(tree.b_b)?;
            assert_eq!(app.focused(), tree.root);

            rt.step();
            app.frame(rt)?;
            assert_eq!(app.focused(), tree.root);
            Ok(())
        })
    }

    #[test]
    fn blur_scopes_to_the_given_subtree() -> Result<()> {
        run_ttree(|app, _rt, tree| {
            assert!(app.set_focus(tree.a_a.into()));

            // Blurring an unrelated subtree leaves focus alone.
            assert!(!app.blur(tree.b.into()));
            assert_eq!(app.focused(), tree.a_a.into());

            // Blurring an ancestor clears it.
            assert!(app.blur(tree.a.into()));
            assert_eq!(app.focused(), tree.root);
            Ok(())
        })
    }

    #[test]
    fn focus_ancestry_is_visible_after_build() -> Result<()> {
        run_ttree(|app, _rt, tree| {
            assert!(app.set_focus(tree.a_a.into()));
            assert!(app.is_focused_or_has_focused_child(tree.a_a.into()));
            assert!(app.is_focused_or_has_focused_child(tree.a.into()));
            assert!(app.is_focused_or_has_focused_child(tree.root));
            assert!(!app.is_focused_or_has_focused_child(tree.a_b.into()));
            assert!(!app.is_focused_or_has_focused_child(tree.b.into()));
            Ok(())
        })
    }

    /// Asks about focus ancestry while the tree is still building.
    struct AsksTooEarly;

    impl Widget for AsksTooEarly {
        fn build(&mut self, ctx: &mut Context<'_>) -> Result<()> {
            let root = ctx.root();
            let _ = ctx.is_focused_or_has_focused_child(root);
            Ok(())
        }
    }

    #[test]
    #[should_panic(expected = "focus ancestry is undefined during build")]
    fn focus_ancestry_is_off_limits_during_build() {
        let mut app = App::new(AsksTooEarly);
        app.set_bounds(Rect::new(0, 0, 10, 10));
        let rt = TestRuntime::new();
        let _ = app.frame(&rt);
    }
}
