use crate::{
    conversion::{ConversionContext, classify},
    eval::{CastExpressionNode, EvalResult, Evaluable, Evaluator, ImplicitConversionNode, Operand},
    utils::EvalError,
};

impl Evaluable for CastExpressionNode {
    fn evaluate(&self, evaluator: &Evaluator<'_>) -> EvalResult {
        evaluator.convert(self.source, self.target, ConversionContext::Explicit)
    }
}

impl Evaluable for ImplicitConversionNode {
    fn evaluate(&self, evaluator: &Evaluator<'_>) -> EvalResult {
        evaluator.convert(self.source, self.target, ConversionContext::Implicit)
    }
}

impl Evaluator<'_> {
    /// A legal conversion evaluates to the target type whatever the method.
    fn convert(&self, source: Operand, target: Operand, context: ConversionContext) -> EvalResult {
        let (source, target) = self.resolve_pair(source, target)?;

        if classify(source, target, context).is_legal() {
            return Ok(target);
        }
        Err(match context {
            ConversionContext::Explicit => EvalError::BadCast {
                from: source,
                to: target,
            },
            ConversionContext::Implicit => EvalError::BadImplicitConversion {
                from: source,
                to: target,
            },
        })
    }
}
