//! Bubble content: circles sized by each point's weight.

use super::{convert_points, Content, ContentFrame, GraphData, PointNodes};
use crate::context::GraphContext;
use cgraph_common::Result;
use cgraph_config::defaults::DEFAULT_CONTENT_COLOR;
use cgraph_config::{validate_content, ContentConfig, ContentInput, DataPoint, MarkerShape};

/// Smallest bubble diameter.
pub const MIN_BUBBLE_SIZE: f64 = 6.0;
/// Largest bubble diameter.
pub const MAX_BUBBLE_SIZE: f64 = 60.0;

/// Bubble series.
#[derive(Debug)]
pub struct Bubble {
    config: ContentConfig,
    frame: ContentFrame,
    points: PointNodes,
}

/// Diameter for a weight, interpolated over the series' weight range.
///
/// Points without a weight, and series with a single distinct weight, use
/// the smallest size.
fn bubble_size(weights: Option<(f64, f64)>, point: &DataPoint) -> f64 {
    match (weights, point.weight) {
        (Some((low, high)), Some(weight)) if high > low => {
            let t = ((weight - low) / (high - low)).clamp(0.0, 1.0);
            MIN_BUBBLE_SIZE + t * (MAX_BUBBLE_SIZE - MIN_BUBBLE_SIZE)
        }
        _ => MIN_BUBBLE_SIZE,
    }
}

fn weight_range(values: &[DataPoint]) -> Option<(f64, f64)> {
    values
        .iter()
        .filter_map(|point| point.weight.filter(|weight| weight.is_finite()))
        .fold(None, |range, weight| match range {
            None => Some((weight, weight)),
            Some((low, high)) => Some((f64::min(low, weight), f64::max(high, weight))),
        })
}

impl Bubble {
    /// Validates input into a bubble series. Bubbles are always circles.
    pub fn new(input: &ContentInput) -> Result<Self> {
        let mut config = validate_content(input, DEFAULT_CONTENT_COLOR)?;
        config.shape = MarkerShape::Circle;
        Ok(Self {
            config,
            frame: ContentFrame::default(),
            points: PointNodes::default(),
        })
    }

    /// Rendered bubbles.
    pub const fn points(&self) -> &PointNodes {
        &self.points
    }

    fn render(&mut self, ctx: &mut GraphContext) {
        let Some(group) = self.frame.group else {
            return;
        };
        if ctx.config.is_shown(&self.config.key) {
            let weights = weight_range(&self.config.values);
            self.points
                .render(ctx, group, &self.config, |point| bubble_size(weights, point));
        }
    }
}

impl Content for Bubble {
    fn config(&self) -> &ContentConfig {
        &self.config
    }

    fn kind(&self) -> &'static str {
        "bubble"
    }

    fn load(&mut self, ctx: &mut GraphContext) -> Result<()> {
        self.frame = ContentFrame::attach(ctx, &self.config, self.kind());
        self.render(ctx);
        Ok(())
    }

    fn unload(&mut self, ctx: &mut GraphContext) {
        self.frame.detach(ctx, &self.config.key);
        self.points.clear();
    }

    fn resize(&mut self, ctx: &mut GraphContext) {
        self.points.reposition(ctx, &self.config);
        self.frame.reposition(ctx, &self.config);
    }

    fn reflow(&mut self, ctx: &mut GraphContext, data: &GraphData) -> Result<()> {
        self.config.values = convert_points(&data.values, ctx.config.axis.x.axis_type)?;
        if let Some(group) = self.frame.group {
            if ctx.config.is_shown(&self.config.key) {
                let weights = weight_range(&self.config.values);
                self.points
                    .sync(ctx, group, &self.config, |point| bubble_size(weights, point));
            }
        }
        Ok(())
    }

    fn redraw(&mut self, ctx: &mut GraphContext) {
        self.frame.clear(ctx);
        self.points.clear();
        self.render(ctx);
        self.frame.reposition(ctx, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, input};
    use super::*;
    use cgraph_config::{PointInput, XValue};

    fn point(weight: Option<f64>) -> DataPoint {
        DataPoint {
            x: XValue::Number(0.0),
            y: Some(0.0),
            weight,
        }
    }

    #[test]
    fn test_size_interpolates_weight() {
        let range = Some((0.0, 10.0));
        assert_eq!(bubble_size(range, &point(Some(0.0))), MIN_BUBBLE_SIZE);
        assert_eq!(bubble_size(range, &point(Some(10.0))), MAX_BUBBLE_SIZE);
        assert_eq!(bubble_size(range, &point(None)), MIN_BUBBLE_SIZE);
        assert_eq!(bubble_size(Some((5.0, 5.0)), &point(Some(5.0))), MIN_BUBBLE_SIZE);
    }

    #[test]
    fn test_bubbles_are_circles_sized_by_weight() {
        let mut ctx = context();
        let mut content = input("uid_1", &[]);
        content.values = Some(vec![
            PointInput {
                weight: Some(1.0),
                ..PointInput::new(10.0, Some(2.0))
            },
            PointInput {
                weight: Some(3.0),
                ..PointInput::new(20.0, Some(4.0))
            },
        ]);
        let mut bubble = Bubble::new(&content).unwrap();
        bubble.load(&mut ctx).unwrap();
        assert_eq!(bubble.config().shape, MarkerShape::Circle);

        let largest = bubble.points().get(1).unwrap();
        let circle = ctx.document.children(largest)[0];
        assert_eq!(ctx.document.attr(circle, "r"), Some("30"));
    }
}
