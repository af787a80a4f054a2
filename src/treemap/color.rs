//! 涨跌配色：红系涨、绿系跌、灰色平盘

/// sRGB颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// 小写十六进制："#a0a0a0"
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// 平盘与无效开盘价的中性灰
pub const NEUTRAL: Rgb = Rgb::new(0xa0, 0xa0, 0xa0);

const GAIN_FROM: Rgb = Rgb::new(0x80, 0x30, 0x10);
const GAIN_TO: Rgb = Rgb::new(0xd0, 0x10, 0x10);
const LOSS_FROM: Rgb = Rgb::new(0x10, 0x80, 0x30);
const LOSS_TO: Rgb = Rgb::new(0x10, 0xd0, 0x10);

/// 涨跌幅满刻度(百分比)，超出部分按端点色饱和
const FULL_SCALE_PCT: f64 = 9.0;

/// 按通道线性插值，t截断到[0,1]
pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |from: u8, to: u8| -> u8 {
        (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
    };
    Rgb::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}

/// 个股填充色
///
/// 以涨跌幅|change/open*100|在[0,9]上取梯度位置；涨跌额为零或
/// 开盘价非正(含停牌、数据缺失归零)一律中性灰，不产生NaN。
pub fn change_color(change: f64, open: f64) -> Rgb {
    if change == 0.0 || open <= 0.0 {
        return NEUTRAL;
    }
    let pct = (change / open * 100.0).abs().min(FULL_SCALE_PCT);
    let t = pct / FULL_SCALE_PCT;
    if change > 0.0 {
        lerp(GAIN_FROM, GAIN_TO, t)
    } else {
        lerp(LOSS_FROM, LOSS_TO, t)
    }
}
