//! Integration tests for the draw pass.

#[cfg(test)]
mod tests {
    use trellis::testing::{TestRuntime, TestSurface};
    use trellis::{App, ChildList, Color, Context, Painter, Rect, Result, Size, Widget, WidgetId};

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);

    /// Fills its bounds with a color and places children at fixed slots.
    struct Panel {
        color: Color,
        slots: Vec<(WidgetId, Rect)>,
        lift: i32,
    }

    impl Panel {
        fn new(color: Color) -> Self {
            Panel {
                color,
                slots: vec![],
                lift: 0,
            }
        }
    }

    impl Widget for Panel {
        fn append_child_widgets(&mut self, _ctx: &mut Context<'_>, children: &mut ChildList) {
            for (kid, _) in &self.slots {
                children.append(*kid);
            }
        }

        fn layout(&self, _ctx: &mut Context<'_>, child: WidgetId) -> Rect {
            self.slots
                .iter()
                .find(|(kid, _)| *kid == child)
                .map_or(Rect::EMPTY, |(_, rect)| *rect)
        }

        fn draw(&mut self, ctx: &mut Context<'_>, painter: &mut Painter<'_>) {
            let bounds = ctx.bounds(ctx.widget_id());
            painter.fill_rect(bounds, self.color);
        }

        fn z_delta(&self) -> i32 {
            self.lift
        }
    }

    #[test]
    fn widgets_draw_parent_first_with_nested_clips() -> Result<()> {
        let mut app = App::new(Panel::new(RED));
        let leaf = app.insert(Panel::new(BLUE));
        let mid = app.insert(Panel {
            color: GREEN,
            slots: vec![(leaf, Rect::new(40, 40, 90, 90))],
            lift: 0,
        });
        app.root_as_mut::<Panel>()?.slots = vec![(mid, Rect::new(10, 10, 50, 50))];
        app.set_bounds(Rect::new(0, 0, 100, 100));

        let rt = TestRuntime::new();
        let mut surface = TestSurface::new();
        app.frame(&rt)?;
        app.draw(&mut surface)?;

        // Parents paint before children; each is scissored to its visible
        // region, so the leaf reaching past its parent clips to the overlap.
        assert_eq!(
            surface.clipped_fills(),
            vec![
                (
                    Some(Rect::new(0, 0, 100, 100)),
                    Rect::new(0, 0, 100, 100),
                    RED
                ),
                (
                    Some(Rect::new(10, 10, 50, 50)),
                    Rect::new(10, 10, 50, 50),
                    GREEN
                ),
                (
                    Some(Rect::new(40, 40, 50, 50)),
                    Rect::new(40, 40, 90, 90),
                    BLUE
                ),
            ]
        );
        Ok(())
    }

    #[test]
    fn elevated_widgets_composite_last_and_escape_the_parent_clip() -> Result<()> {
        let mut app = App::new(Panel::new(RED));
        let overlay = app.insert(Panel {
            color: BLUE,
            slots: vec![],
            lift: 1,
        });
        let sibling = app.insert(Panel::new(YELLOW));
        let mid = app.insert(Panel {
            color: GREEN,
            slots: vec![
                (overlay, Rect::new(40, 40, 90, 90)),
                (sibling, Rect::new(15, 15, 30, 30)),
            ],
            lift: 0,
        });
        app.root_as_mut::<Panel>()?.slots = vec![(mid, Rect::new(10, 10, 50, 50))];
        app.set_bounds(Rect::new(0, 0, 100, 100));

        let rt = TestRuntime::new();
        let mut surface = TestSurface::new();
        app.frame(&rt)?;
        app.draw(&mut surface)?;

        // The overlay is declared before its sibling but paints after it,
        // and its clip ignores the parent's bounds.
        assert_eq!(
            surface.clipped_fills(),
            vec![
                (
                    Some(Rect::new(0, 0, 100, 100)),
                    Rect::new(0, 0, 100, 100),
                    RED
                ),
                (
                    Some(Rect::new(10, 10, 50, 50)),
                    Rect::new(10, 10, 50, 50),
                    GREEN
                ),
                (
                    Some(Rect::new(15, 15, 30, 30)),
                    Rect::new(15, 15, 30, 30),
                    YELLOW
                ),
                (
                    Some(Rect::new(40, 40, 90, 90)),
                    Rect::new(40, 40, 90, 90),
                    BLUE
                ),
            ]
        );
        Ok(())
    }

    #[test]
    fn opacity_multiplies_down_the_tree() -> Result<()> {
        let mut app = App::new(Panel::new(RED));
        let leaf = app.insert(Panel::new(BLUE));
        let mid = app.insert(Panel {
            color: GREEN,
            slots: vec![(leaf, Rect::new(20, 20, 40, 40))],
            lift: 0,
        });
        app.root_as_mut::<Panel>()?.slots = vec![(mid, Rect::new(10, 10, 50, 50))];
        app.set_bounds(Rect::new(0, 0, 100, 100));
        app.set_opacity(mid, 0.5);
        app.set_opacity(leaf, 0.5);

        let rt = TestRuntime::new();
        let mut surface = TestSurface::new();
        app.frame(&rt)?;
        app.draw(&mut surface)?;

        let fills = surface.fills();
        assert_eq!(fills[0], (Rect::new(0, 0, 100, 100), RED));
        assert_eq!(
            fills[1],
            (Rect::new(10, 10, 50, 50), GREEN.with_alpha_scaled(0.5))
        );
        assert_eq!(
            fills[2],
            (Rect::new(20, 20, 40, 40), BLUE.with_alpha_scaled(0.25))
        );

        // A fully transparent subtree is skipped outright.
        app.set_opacity(mid, 0.0);
        app.frame(&rt)?;
        surface.clear();
        app.draw(&mut surface)?;
        let colors: Vec<Color> = surface.fills().into_iter().map(|(_, c)| c).collect();
        assert_eq!(colors, vec![RED]);
        Ok(())
    }

    /// Installs or clears a draw hook on its child during build.
    struct HookHost {
        kid: Option<WidgetId>,
        install: bool,
        clear: bool,
    }

    impl Widget for HookHost {
        fn append_child_widgets(&mut self, _ctx: &mut Context<'_>, children: &mut ChildList) {
            if let Some(kid) = self.kid {
                children.append(kid);
            }
        }

        fn layout(&self, _ctx: &mut Context<'_>, _child: WidgetId) -> Rect {
            Rect::new(10, 10, 30, 30)
        }

        fn build(&mut self, ctx: &mut Context<'_>) -> Result<()> {
            let Some(kid) = self.kid else {
                return Ok(());
            };
            if self.install {
                self.install = false;
                ctx.set_custom_draw(kid, |ctx, painter| {
                    let bounds = ctx.bounds(ctx.widget_id());
                    painter.fill_rect(bounds, MAGENTA);
                });
            }
            if self.clear {
                self.clear = false;
                ctx.clear_custom_draw(kid);
            }
            Ok(())
        }
    }

    /// Color painted into the child slot, if any fill targeted it.
    fn kid_fill(surface: &TestSurface) -> Option<Color> {
        surface
            .fills()
            .into_iter()
            .find(|(rect, _)| *rect == Rect::new(10, 10, 30, 30))
            .map(|(_, color)| color)
    }

    #[test]
    fn a_custom_draw_hook_replaces_the_widgets_draw() -> Result<()> {
        let mut app = App::new(HookHost {
            kid: None,
            install: false,
            clear: false,
        });
        let kid = app.insert(Panel::new(BLUE));
        app.root_as_mut::<HookHost>()?.kid = Some(kid);
        app.set_bounds(Rect::new(0, 0, 100, 100));
        let mut rt = TestRuntime::new();
        let mut surface = TestSurface::new();

        app.frame(&rt)?;
        app.draw(&mut surface)?;
        assert_eq!(kid_fill(&surface), Some(BLUE));

        // Installing a hook swaps out the widget's own draw.
        app.root_as_mut::<HookHost>()?.install = true;
        rt.step();
        app.frame(&rt)?;
        surface.clear();
        app.draw(&mut surface)?;
        assert_eq!(kid_fill(&surface), Some(MAGENTA));

        // The hook persists across draws.
        app.request_full_redraw();
        surface.clear();
        app.draw(&mut surface)?;
        assert_eq!(kid_fill(&surface), Some(MAGENTA));

        // Clearing it restores the widget's own draw.
        app.root_as_mut::<HookHost>()?.clear = true;
        rt.step();
        app.frame(&rt)?;
        surface.clear();
        app.draw(&mut surface)?;
        assert_eq!(kid_fill(&surface), Some(BLUE));
        Ok(())
    }

    #[test]
    fn clean_frames_draw_nothing() -> Result<()> {
        let mut app = App::new(Panel::new(RED));
        let kid = app.insert(Panel::new(BLUE));
        app.root_as_mut::<Panel>()?.slots = vec![(kid, Rect::new(20, 20, 40, 40))];
        app.set_bounds(Rect::new(0, 0, 100, 100));
        let mut rt = TestRuntime::new();
        let mut surface = TestSurface::new();

        app.frame(&rt)?;
        app.draw(&mut surface)?;
        assert!(!surface.ops.is_empty());

        // Nothing changed, so the next frame has nothing to repaint.
        rt.step();
        app.frame(&rt)?;
        assert!(!app.redraw_pending());
        surface.clear();
        app.draw(&mut surface)?;
        assert!(surface.ops.is_empty());

        // An explicit full-redraw request repaints everything.
        app.request_full_redraw();
        app.draw(&mut surface)?;
        assert_eq!(surface.fills().len(), 2);
        Ok(())
    }

    #[test]
    fn moving_a_widget_repaints_its_old_and_new_bounds() -> Result<()> {
        let mut app = App::new(Panel::new(RED));
        let kid = app.insert(Panel::new(BLUE));
        app.root_as_mut::<Panel>()?.slots = vec![(kid, Rect::EMPTY)];
        app.set_size(kid, Size::new(10, 10));
        app.set_bounds(Rect::new(0, 0, 100, 100));
        let mut rt = TestRuntime::new();
        let mut surface = TestSurface::new();
        app.frame(&rt)?;
        app.draw(&mut surface)?;

        app.set_position(kid, (50, 50));
        rt.step();
        app.frame(&rt)?;
        assert!(app.redraw_pending());
        surface.clear();
        app.draw(&mut surface)?;

        // The repaint region covers both the vacated and the new pixels.
        assert_eq!(
            surface.clipped_fills(),
            vec![
                (
                    Some(Rect::new(0, 0, 60, 60)),
                    Rect::new(0, 0, 100, 100),
                    RED
                ),
                (
                    Some(Rect::new(50, 50, 60, 60)),
                    Rect::new(50, 50, 60, 60),
                    BLUE
                ),
            ]
        );
        Ok(())
    }

    #[test]
    fn hidden_subtrees_are_not_drawn() -> Result<()> {
        let mut app = App::new(Panel::new(RED));
        let kid = app.insert(Panel::new(BLUE));
        app.root_as_mut::<Panel>()?.slots = vec![(kid, Rect::new(20, 20, 40, 40))];
        app.set_bounds(Rect::new(0, 0, 100, 100));
        let mut rt = TestRuntime::new();
        let mut surface = TestSurface::new();
        app.frame(&rt)?;
        app.draw(&mut surface)?;
        assert_eq!(surface.fills().len(), 2);

        app.set_hidden(kid, true);
        rt.step();
        app.frame(&rt)?;
        surface.clear();
        app.draw(&mut surface)?;

        // Only the uncovered parent repaints the vacated region.
        assert_eq!(
            surface.clipped_fills(),
            vec![(
                Some(Rect::new(20, 20, 40, 40)),
                Rect::new(0, 0, 100, 100),
                RED
            )]
        );

        app.set_hidden(kid, false);
        rt.step();
        app.frame(&rt)?;
        surface.clear();
        app.draw(&mut surface)?;
        assert_eq!(
            surface.fills(),
            vec![
                (Rect::new(0, 0, 100, 100), RED),
                (Rect::new(20, 20, 40, 40), BLUE),
            ]
        );
        Ok(())
    }
}
