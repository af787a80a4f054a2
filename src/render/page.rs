//! 自包含HTML页面
//!
//! 内嵌SVG文档、提示卡样式与脚本。页面不依赖任何外部资源，直接
//! 双击打开即可。脚本里的偏移、渐入时长与不透明度都从tooltip模块
//! 的常量注入，渲染端与行为端共用一份定义。

use std::fmt::Write as _;

use crate::treemap::tooltip::{escape_html, TOOLTIP};

/// 把SVG文档包装成带提示卡运行时的完整页面
pub fn render_page(svg: &str, title: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset='utf-8'/>\n",
            "<title>{title}</title>\n",
            "<style>\n",
            "body {{ margin: 0; background: #111; }}\n",
            ".tooltip {{\n",
            "  opacity: 0;\n",
            "  background-color: white;\n",
            "  border: solid;\n",
            "  border-width: 2px;\n",
            "  border-radius: 5px;\n",
            "  padding: 5px;\n",
            "  position: absolute;\n",
            "  pointer-events: none;\n",
            "}}\n",
            "</style>\n",
            "</head>\n",
            "<body>\n"
        ),
        title = escape_html(title),
    );
    html.push_str(svg);
    let _ = write!(
        html,
        concat!(
            "<script>\n",
            "(function() {{\n",
            "  var tip = null;\n",
            "  function tooltip() {{\n",
            "    if (!tip) {{\n",
            "      tip = document.createElement('div');\n",
            "      tip.className = 'tooltip';\n",
            "      document.body.appendChild(tip);\n",
            "    }}\n",
            "    return tip;\n",
            "  }}\n",
            "  document.querySelectorAll('[data-tip]').forEach(function(el) {{\n",
            "    el.addEventListener('mouseover', function(ev) {{\n",
            "      var t = tooltip();\n",
            "      t.innerHTML = el.getAttribute('data-tip');\n",
            "      t.style.left = (ev.pageX + {dx}) + 'px';\n",
            "      t.style.top = (ev.pageY + {dy}) + 'px';\n",
            "      t.style.transition = 'opacity {fade}ms';\n",
            "      t.style.opacity = '{opacity}';\n",
            "    }});\n",
            "    el.addEventListener('mouseleave', function() {{\n",
            "      var t = tooltip();\n",
            "      t.style.transition = 'none';\n",
            "      t.style.opacity = '0';\n",
            "    }});\n",
            "  }});\n",
            "}})();\n",
            "</script>\n",
            "</body>\n",
            "</html>\n"
        ),
        dx = TOOLTIP.offset_x,
        dy = TOOLTIP.offset_y,
        fade = TOOLTIP.fade_in_ms,
        opacity = TOOLTIP.opacity,
    );
    html
}
